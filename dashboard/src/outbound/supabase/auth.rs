//! Identity provider adapter for the platform's auth API.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use super::dto::{PasswordGrantDto, RecoverDto, TokenResponseDto};
use super::http::{PlatformFailure, SupabaseClient, send_empty, send_json};
use crate::domain::ports::{IdentityProvider, IdentityProviderError, SessionChanges};
use crate::domain::{EmailAddress, LoginCredentials, Principal};

/// Identity provider backed by the auth API.
pub struct SupabaseIdentityProvider {
    client: Arc<SupabaseClient>,
}

impl SupabaseIdentityProvider {
    /// Create an adapter sharing `client`'s session.
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

fn map_failure(failure: PlatformFailure) -> IdentityProviderError {
    match failure {
        PlatformFailure::Transport(message) => IdentityProviderError::transport(message),
        PlatformFailure::Status { message, .. } => IdentityProviderError::rejected(message),
        PlatformFailure::Decode(message) => IdentityProviderError::decode(message),
    }
}

fn recover_url(endpoint: Url, redirect_to: Option<&Url>) -> Url {
    let mut url = endpoint;
    if let Some(redirect) = redirect_to {
        url.query_pairs_mut()
            .append_pair("redirect_to", redirect.as_str());
    }
    url
}

#[async_trait]
impl IdentityProvider for SupabaseIdentityProvider {
    fn current_principal(&self) -> Option<Principal> {
        self.client.session().principal()
    }

    async fn sign_in(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Principal, IdentityProviderError> {
        let mut url = self
            .client
            .endpoint(&["auth", "v1", "token"])
            .map_err(map_failure)?;
        url.query_pairs_mut().append_pair("grant_type", "password");
        let request = self
            .client
            .anonymous(self.client.post(url))
            .json(&PasswordGrantDto {
                email: credentials.email().as_str(),
                password: credentials.password(),
            });
        let response: TokenResponseDto = send_json(request).await.map_err(map_failure)?;
        let session = response
            .into_session(self.client.now())
            .map_err(IdentityProviderError::decode)?;
        let principal = session.principal().clone();
        debug!(user_id = %principal.user_id(), "signed in");
        self.client.session().store(session);
        Ok(principal)
    }

    async fn send_password_reset(
        &self,
        email: &EmailAddress,
        redirect_to: Option<Url>,
    ) -> Result<(), IdentityProviderError> {
        let endpoint = self
            .client
            .endpoint(&["auth", "v1", "recover"])
            .map_err(map_failure)?;
        let url = recover_url(endpoint, redirect_to.as_ref());
        let request = self
            .client
            .anonymous(self.client.post(url))
            .json(&RecoverDto {
                email: email.as_str(),
            });
        send_empty(request).await.map_err(map_failure)
    }

    async fn sign_out(&self) -> Result<(), IdentityProviderError> {
        let Some(previous) = self.client.session().clear() else {
            return Ok(());
        };
        let url = self
            .client
            .endpoint(&["auth", "v1", "logout"])
            .map_err(map_failure)?;
        let request = self
            .client
            .with_token(self.client.post(url), previous.access_token());
        send_empty(request).await.map_err(map_failure)
    }

    fn subscribe(&self) -> SessionChanges {
        self.client.session().subscribe()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network auth helpers.
    use super::*;
    use reqwest::StatusCode;
    use rstest::rstest;

    #[rstest]
    fn recover_url_carries_the_redirect() {
        let endpoint = Url::parse("https://abc.supabase.co/auth/v1/recover").expect("url");
        let redirect = Url::parse("https://painel.example.com/login?tab=reset").expect("url");
        let url = recover_url(endpoint, Some(&redirect));
        assert_eq!(
            url.as_str(),
            "https://abc.supabase.co/auth/v1/recover?redirect_to=https%3A%2F%2Fpainel.example.com%2Flogin%3Ftab%3Dreset"
        );
    }

    #[rstest]
    fn recover_url_without_redirect_has_no_query() {
        let endpoint = Url::parse("https://abc.supabase.co/auth/v1/recover").expect("url");
        assert_eq!(recover_url(endpoint, None).query(), None);
    }

    #[rstest]
    fn rejected_statuses_keep_the_message() {
        let err = map_failure(PlatformFailure::Status {
            status: StatusCode::BAD_REQUEST,
            message: "Invalid login credentials".to_owned(),
            duplicate: false,
        });
        assert_eq!(err, IdentityProviderError::rejected("Invalid login credentials"));
    }
}
