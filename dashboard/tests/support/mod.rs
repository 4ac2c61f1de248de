//! Shared doubles for dashboard integration tests.
//!
//! Integration tests compile as separate crates, so the `mockall` mocks
//! generated under `cfg(test)` are not visible here. These hand-written
//! doubles record calls and return configured responses instead.

#![expect(dead_code, reason = "each test crate uses a different subset")]

pub mod doubles;
mod recording_double_macro;
