//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **supabase**: reqwest-backed identity, table and storage adapters for
//!   the hosted platform.
//!
//! Adapters are thin translators between domain types and wire shapes. They
//! contain no business logic.

pub mod supabase;
