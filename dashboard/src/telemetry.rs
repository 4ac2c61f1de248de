//! Tracing subscriber installation.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt};

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info";

/// Output shape for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// Single-line human-readable events.
    #[default]
    Compact,
}

impl LogFormat {
    /// JSON when `json` is set, compact otherwise.
    pub const fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Compact }
    }
}

/// The global subscriber could not be installed.
#[derive(Debug, Error)]
#[error("failed to install tracing subscriber: {message}")]
pub struct TelemetryError {
    message: String,
}

/// Install the global `tracing` subscriber.
///
/// Filtering follows `RUST_LOG`, defaulting to `info`.
///
/// # Errors
///
/// Returns an error when a global subscriber is already installed.
pub fn init_tracing(format: LogFormat) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = fmt().with_env_filter(filter);
    let installed = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
    installed.map_err(|error| TelemetryError {
        message: error.to_string(),
    })
}
