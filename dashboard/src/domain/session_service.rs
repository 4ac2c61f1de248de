//! Session commands behind the login screen and the sign-out button.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

use crate::domain::ports::{
    IdentityProvider, IdentityProviderError, SessionChanges, SessionCommand,
};
use crate::domain::{EmailAddress, Error, LoginCredentials, Principal};

/// Session service implementing the [`SessionCommand`] driving port.
#[derive(Clone)]
pub struct SessionService<I> {
    identity: Arc<I>,
    reset_redirect: Option<Url>,
}

impl<I> SessionService<I> {
    /// Create a service; reset emails link back to `reset_redirect` when set.
    pub fn new(identity: Arc<I>, reset_redirect: Option<Url>) -> Self {
        Self {
            identity,
            reset_redirect,
        }
    }
}

fn map_identity_error(error: IdentityProviderError) -> Error {
    match error {
        IdentityProviderError::Transport { message }
        | IdentityProviderError::Rejected { message } => Error::external_service(message),
        IdentityProviderError::Decode { message } => {
            Error::internal(format!("identity response could not be read: {message}"))
        }
    }
}

#[async_trait]
impl<I> SessionCommand for SessionService<I>
where
    I: IdentityProvider,
{
    async fn sign_in(&self, email: &str, password: &str) -> Result<Principal, Error> {
        let credentials = LoginCredentials::try_from_parts(email, password)
            .map_err(|err| Error::validation(err.to_string()))?;
        debug!(email = %credentials.email(), "signing in");
        self.identity
            .sign_in(&credentials)
            .await
            .map_err(map_identity_error)
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), Error> {
        let address = EmailAddress::new(email).map_err(|err| Error::validation(err.to_string()))?;
        self.identity
            .send_password_reset(&address, self.reset_redirect.clone())
            .await
            .map_err(map_identity_error)
    }

    async fn sign_out(&self) -> Result<(), Error> {
        self.identity.sign_out().await.map_err(|err| {
            warn!(error = %err, "remote sign-out failed; local session already cleared");
            map_identity_error(err)
        })
    }

    fn subscribe(&self) -> SessionChanges {
        self.identity.subscribe()
    }
}
