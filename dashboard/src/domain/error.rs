//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound view models turn them into
//! user-facing messages; outbound adapters report through port errors and
//! never construct them directly.

use std::fmt;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// User input failed validation; no network call was attempted.
    Validation,
    /// A session is present but no provisioned profile backs it.
    AuthenticationState,
    /// The hosted platform failed or rejected the call.
    ExternalService,
    /// Stored data violates an invariant the client relies on.
    DataIntegrity,
    /// An unexpected failure inside the client.
    Internal,
}

impl ErrorCode {
    const fn fallback_message(self) -> &'static str {
        match self {
            Self::Validation => "invalid input",
            Self::AuthenticationState => "profile not found for the current session",
            Self::ExternalService => "the platform request failed",
            Self::DataIntegrity => "stored data is inconsistent",
            Self::Internal => "unexpected client error",
        }
    }
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` is non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use dashboard::domain::{Error, ErrorCode};
///
/// let err = Error::validation("Enter a valid amount.");
/// assert_eq!(err.code(), ErrorCode::Validation);
/// assert_eq!(err.to_string(), "Enter a valid amount.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
}

/// Validation errors emitted by [`Error::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorValidationError {
    /// The supplied message was blank.
    EmptyMessage,
}

impl fmt::Display for ErrorValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "error message must not be empty"),
        }
    }
}

impl std::error::Error for ErrorValidationError {}

impl Error {
    /// Create a new error. Blank messages fall back to the code's generic
    /// description so callers always have something to show.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::try_new(code, message).unwrap_or_else(|_| Self {
            code,
            message: code.fallback_message().to_owned(),
        })
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self { code, message })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message, surfaced verbatim to the user.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Convenience constructor for [`ErrorCode::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Validation, message)
    }

    /// Convenience constructor for [`ErrorCode::AuthenticationState`].
    pub fn authentication_state(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthenticationState, message)
    }

    /// Convenience constructor for [`ErrorCode::ExternalService`].
    pub fn external_service(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalService, message)
    }

    /// Convenience constructor for [`ErrorCode::DataIntegrity`].
    pub fn data_integrity(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DataIntegrity, message)
    }

    /// Convenience constructor for [`ErrorCode::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}
