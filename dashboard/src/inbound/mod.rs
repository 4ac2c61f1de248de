//! Inbound adapters that turn user interaction into use-case calls.
//!
//! The dashboard view models live under [`dashboard`]. They hold screen
//! state and call driving ports only; rendering is left to the host.

pub mod dashboard;
