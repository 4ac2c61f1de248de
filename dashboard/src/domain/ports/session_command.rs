//! Driving port for signing in and out.

use async_trait::async_trait;

use crate::domain::{Error, Principal};

use super::SessionChanges;

/// Use-case port for session management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionCommand: Send + Sync {
    /// Sign in with raw form values.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Principal, Error>;

    /// Request a password reset email for the raw form value.
    async fn send_password_reset(&self, email: &str) -> Result<(), Error>;

    /// Sign out of the current session.
    async fn sign_out(&self) -> Result<(), Error>;

    /// Subscribe to session changes.
    fn subscribe(&self) -> SessionChanges;
}
