//! Cash-flow dashboard client for small businesses on a hosted
//! Supabase-compatible backend.
//!
//! Owners see today's and the month's results plus recent entries;
//! attendants record entries and stage invoices or POS reports for
//! processing. The crate follows a ports-and-adapters layout:
//!
//! - [`domain`]: entities, rules, use-case services and port traits.
//! - [`outbound`]: reqwest adapters for auth, tables and storage.
//! - [`inbound`]: view models the host renders.
//! - [`config`], [`telemetry`] and [`wiring`]: settings, logging and the
//!   composition root.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod telemetry;
pub mod wiring;

pub use config::PlatformSettings;
pub use wiring::{WiringError, build_ports, launch};
