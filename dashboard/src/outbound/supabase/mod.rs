//! Adapters for the hosted Supabase-compatible platform.
//!
//! One [`SupabaseClient`] holds the HTTP client, project URL, anon key and
//! session; the identity, table and storage adapters share it so every
//! request carries the current session token.

mod auth;
mod dto;
mod http;
mod rest;
mod session;
mod storage;

pub use auth::SupabaseIdentityProvider;
pub use http::SupabaseClient;
pub use rest::PostgrestStore;
pub use storage::SupabaseObjectStorage;
