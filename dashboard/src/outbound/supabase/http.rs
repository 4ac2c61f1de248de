//! Shared reqwest client for the hosted platform.
//!
//! Owns transport details only: endpoint construction, the `apikey` and
//! bearer headers, session refresh, status mapping and body decoding. Each
//! adapter turns a [`PlatformFailure`] into its own port error.

use std::sync::Arc;
use std::time::Duration;

use mockable::Clock;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::dto::{PlatformErrorDto, RefreshGrantDto, TokenResponseDto};
use super::session::{Checkout, SessionStore, StoredSession};

/// Failure of one platform request, before port-specific mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum PlatformFailure {
    /// The request never produced a response.
    Transport(String),
    /// The service answered with a non-success status.
    Status {
        status: StatusCode,
        message: String,
        duplicate: bool,
    },
    /// The response body could not be decoded.
    Decode(String),
}

/// Connection to one platform project.
pub struct SupabaseClient {
    client: Client,
    base_url: Url,
    anon_key: String,
    clock: Arc<dyn Clock>,
    session: SessionStore,
    refresh_lock: Mutex<()>,
}

impl SupabaseClient {
    /// Build a client for the project at `base_url` with a request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        anon_key: impl Into<String>,
        timeout: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url, anon_key, clock))
    }

    fn with_client(
        client: Client,
        base_url: Url,
        anon_key: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            client,
            base_url,
            anon_key: anon_key.into(),
            clock,
            session: SessionStore::new(),
            refresh_lock: Mutex::new(()),
        }
    }

    pub(super) fn session(&self) -> &SessionStore {
        &self.session
    }

    pub(super) fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.utc()
    }

    pub(super) fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Project URL with `segments` appended, each percent-encoded.
    pub(super) fn endpoint(&self, segments: &[&str]) -> Result<Url, PlatformFailure> {
        endpoint_from(&self.base_url, segments)
    }

    /// Start a request carrying the anon key as both `apikey` and bearer.
    pub(super) fn anonymous(&self, builder: RequestBuilder) -> RequestBuilder {
        self.with_token(builder, &self.anon_key)
    }

    /// Start a request carrying the anon key and an explicit bearer token.
    pub(super) fn with_token(&self, builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder
            .header("apikey", self.anon_key.as_str())
            .bearer_auth(token)
    }

    /// Start a request carrying the session token, refreshing it first
    /// when it is about to expire. Falls back to the anon key when signed
    /// out.
    pub(super) async fn authorized(
        &self,
        builder: RequestBuilder,
    ) -> Result<RequestBuilder, PlatformFailure> {
        Ok(match self.fresh_session().await? {
            Some(session) => self.with_token(builder, session.access_token()),
            None => self.anonymous(builder),
        })
    }

    pub(super) fn post(&self, url: Url) -> RequestBuilder {
        self.client.post(url)
    }

    pub(super) fn get(&self, url: Url) -> RequestBuilder {
        self.client.get(url)
    }

    async fn fresh_session(&self) -> Result<Option<StoredSession>, PlatformFailure> {
        let Some(session) = self.session.snapshot() else {
            return Ok(None);
        };
        if !session.needs_refresh(self.now()) {
            return Ok(Some(session));
        }

        let _guard = self.refresh_lock.lock().await;
        // Another caller may have refreshed while this one waited.
        let Some(current) = self.session.checkout() else {
            return Ok(None);
        };
        if !current.session.needs_refresh(self.now()) {
            return Ok(Some(current.session));
        }
        self.refresh(&current).await
    }

    /// Exchange the refresh token of `current`.
    ///
    /// The outcome only lands if `current` is still the live session; after
    /// a sign-out or a new sign-in the stale tokens are dropped and whatever
    /// session is live now is used instead.
    async fn refresh(&self, current: &Checkout) -> Result<Option<StoredSession>, PlatformFailure> {
        debug!("refreshing session token");
        let mut url = self.endpoint(&["auth", "v1", "token"])?;
        url.query_pairs_mut()
            .append_pair("grant_type", "refresh_token");
        let request = self.anonymous(self.post(url)).json(&RefreshGrantDto {
            refresh_token: current.session.refresh_token(),
        });
        match send_json::<TokenResponseDto>(request).await {
            Ok(response) => {
                let refreshed = response
                    .into_session(self.now())
                    .map_err(PlatformFailure::Decode)?;
                if self.session.store_if_current(current.epoch, refreshed.clone()) {
                    Ok(Some(refreshed))
                } else {
                    debug!("session changed during refresh; discarding new tokens");
                    Ok(self.session.snapshot())
                }
            }
            Err(failure @ PlatformFailure::Status { .. }) => {
                if self.session.clear_if_current(current.epoch) {
                    warn!("session refresh rejected; signing out locally");
                }
                Err(failure)
            }
            Err(failure) => Err(failure),
        }
    }
}

pub(super) fn endpoint_from(base_url: &Url, segments: &[&str]) -> Result<Url, PlatformFailure> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| PlatformFailure::Transport(format!("{base_url} cannot carry a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Send a request and decode a JSON body.
pub(super) async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
) -> Result<T, PlatformFailure> {
    let body = send(request).await?;
    serde_json::from_slice(&body)
        .map_err(|error| PlatformFailure::Decode(format!("invalid JSON payload: {error}")))
}

/// Send a request and discard the body.
pub(super) async fn send_empty(request: RequestBuilder) -> Result<(), PlatformFailure> {
    send(request).await.map(drop)
}

async fn send(request: RequestBuilder) -> Result<Vec<u8>, PlatformFailure> {
    let response = request.send().await.map_err(map_transport_error)?;
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    Ok(body.to_vec())
}

fn map_transport_error(error: reqwest::Error) -> PlatformFailure {
    if error.is_timeout() {
        PlatformFailure::Transport(format!("request timed out: {error}"))
    } else {
        PlatformFailure::Transport(error.to_string())
    }
}

pub(super) fn map_status_error(status: StatusCode, body: &[u8]) -> PlatformFailure {
    let envelope = PlatformErrorDto::parse(body);
    let duplicate =
        status == StatusCode::CONFLICT || envelope.as_ref().is_some_and(PlatformErrorDto::is_duplicate);
    let message = match envelope.as_ref().and_then(PlatformErrorDto::message) {
        Some(message) => message.to_owned(),
        None => {
            let preview = body_preview(body);
            if preview.is_empty() {
                format!("status {}", status.as_u16())
            } else {
                format!("status {}: {preview}", status.as_u16())
            }
        }
    };
    PlatformFailure::Status {
        status,
        message,
        duplicate,
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
