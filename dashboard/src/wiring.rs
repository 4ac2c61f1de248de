//! Composition root: builds the platform adapters and domain services and
//! hands them to the view layer as a [`DashboardPorts`] bundle.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{PlatformSettings, SettingsError};
use crate::domain::ports::{CaptureDevice, TransactionsQuery};
use crate::domain::{
    EntryService, IntakeService, LedgerService, ProfileResolver, SessionService, SummaryService,
};
use crate::inbound::dashboard::DashboardPorts;
use crate::telemetry::init_tracing;
use crate::outbound::supabase::{
    PostgrestStore, SupabaseClient, SupabaseIdentityProvider, SupabaseObjectStorage,
};

/// Errors raised while assembling the dashboard.
#[derive(Debug, Error)]
pub enum WiringError {
    /// Settings failed validation.
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Install logging in the configured format, then build the port bundle.
///
/// A subscriber the host already installed is kept.
///
/// # Errors
///
/// Fails when settings are invalid or the HTTP client cannot be built.
pub fn launch(settings: &PlatformSettings) -> Result<DashboardPorts, WiringError> {
    if let Err(error) = init_tracing(settings.log_format()) {
        warn!(%error, "keeping the existing tracing subscriber");
    }
    build_ports(settings)
}

/// Build the port bundle with the system clock and no camera.
///
/// # Errors
///
/// Fails when settings are invalid or the HTTP client cannot be built.
pub fn build_ports(settings: &PlatformSettings) -> Result<DashboardPorts, WiringError> {
    build_ports_with(settings, Arc::new(DefaultClock), None)
}

/// Build the port bundle with an explicit clock and optional camera.
///
/// # Errors
///
/// Fails when settings are invalid or the HTTP client cannot be built.
pub fn build_ports_with(
    settings: &PlatformSettings,
    clock: Arc<dyn Clock>,
    camera: Option<Arc<dyn CaptureDevice>>,
) -> Result<DashboardPorts, WiringError> {
    let base_url = settings.supabase_url()?;
    let client = Arc::new(SupabaseClient::new(
        base_url.clone(),
        settings.anon_key()?,
        settings.request_timeout()?,
        Arc::clone(&clock),
    )?);

    let identity = Arc::new(SupabaseIdentityProvider::new(Arc::clone(&client)));
    let store = Arc::new(PostgrestStore::new(Arc::clone(&client)));
    let storage = Arc::new(SupabaseObjectStorage::new(client));

    let ledger = Arc::new(LedgerService::new(Arc::clone(&store), Arc::clone(&store)));
    let transactions: Arc<dyn TransactionsQuery> = ledger.clone();
    info!(project = %base_url, camera = camera.is_some(), "dashboard wired");

    Ok(DashboardPorts {
        access: Arc::new(ProfileResolver::new(Arc::clone(&identity), Arc::clone(&store))),
        session: Arc::new(SessionService::new(
            identity,
            settings.password_reset_redirect()?,
        )),
        summary: Arc::new(SummaryService::new(Arc::clone(&store))),
        transactions,
        categories: ledger,
        entries: Arc::new(EntryService::new(store)),
        intake: Arc::new(IntakeService::new(storage, Arc::clone(&clock))),
        camera,
        clock,
        recent_transactions_limit: settings.recent_transactions_limit(),
    })
}
