//! Port for the hosted identity service.
//!
//! The provider owns the session. The domain only reads the current
//! principal, asks for sign-in, reset or sign-out, and watches for changes.

use async_trait::async_trait;
use tokio::sync::watch;
use url::Url;

use crate::domain::{EmailAddress, LoginCredentials, Principal};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity provider adapters.
    pub enum IdentityProviderError {
        /// The identity service could not be reached.
        Transport { message: String } =>
            "identity provider request failed: {message}",
        /// The identity service refused the request.
        Rejected { message: String } =>
            "identity provider rejected the request: {message}",
        /// The identity service answered with an unreadable payload.
        Decode { message: String } =>
            "identity provider response could not be decoded: {message}",
    }
}

/// Stream of session changes.
///
/// Every sign-in, refresh and sign-out publishes the principal that is
/// current afterwards, `None` meaning signed out.
#[derive(Debug, Clone)]
pub struct SessionChanges {
    receiver: watch::Receiver<Option<Principal>>,
}

impl SessionChanges {
    /// Wrap the receiving half of a session channel.
    pub fn new(receiver: watch::Receiver<Option<Principal>>) -> Self {
        Self { receiver }
    }

    /// Principal as of the latest published change.
    pub fn current(&self) -> Option<Principal> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change and return the principal it published.
    ///
    /// Returns `None` once the provider has gone away.
    pub async fn changed(&mut self) -> Option<Option<Principal>> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }
}

/// Port for the identity service backing the session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Principal of the current session, if any. Never touches the network.
    fn current_principal(&self) -> Option<Principal>;

    /// Exchange email and password for a session.
    async fn sign_in(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Principal, IdentityProviderError>;

    /// Ask the service to email a password reset link.
    async fn send_password_reset(
        &self,
        email: &EmailAddress,
        redirect_to: Option<Url>,
    ) -> Result<(), IdentityProviderError>;

    /// End the session.
    ///
    /// The local session is cleared and published before the service is
    /// told, so a failed remote call still leaves the client signed out.
    async fn sign_out(&self) -> Result<(), IdentityProviderError>;

    /// Subscribe to session changes.
    fn subscribe(&self) -> SessionChanges;
}
