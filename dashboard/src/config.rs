//! Platform connection settings loaded via OrthoConfig.
//!
//! Values come from `ORION_*` environment variables, configuration files or
//! command-line flags, merged by `ortho_config`.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::telemetry::LogFormat;

const DEFAULT_RECENT_LIMIT: usize = 200;

/// Problems with otherwise well-formed settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// A URL setting does not parse.
    #[error("{field} is not a valid URL: {source}")]
    InvalidUrl {
        /// Setting name.
        field: &'static str,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// The project URL must be reachable over http(s).
    #[error("supabase_url must use http or https, got {scheme}")]
    UnsupportedScheme {
        /// Scheme found in the URL.
        scheme: String,
    },
    /// The anon key is blank.
    #[error("anon_key must not be empty")]
    EmptyAnonKey,
    /// The timeout is zero.
    #[error("request_timeout_secs must be greater than zero")]
    ZeroTimeout,
}

/// Settings for reaching the hosted platform.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ORION")]
pub struct PlatformSettings {
    /// Project base URL, e.g. `https://abc.supabase.co`.
    pub supabase_url: String,
    /// Public anon key sent with every request.
    pub anon_key: String,
    /// Per-request timeout in seconds.
    #[ortho_config(default = 30)]
    pub request_timeout_secs: u64,
    /// Row cap for the recent transactions table.
    #[ortho_config(default = 200)]
    pub recent_transactions_limit: usize,
    /// Where password reset emails send the user back to.
    pub password_reset_redirect: Option<String>,
    /// Emit JSON log lines instead of the compact format.
    pub json_logs: Option<bool>,
}

impl PlatformSettings {
    /// Validated project URL.
    ///
    /// # Errors
    ///
    /// Fails when the URL does not parse or is not http(s).
    pub fn supabase_url(&self) -> Result<Url, SettingsError> {
        let url = parse_url("supabase_url", &self.supabase_url)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(SettingsError::UnsupportedScheme {
                scheme: other.to_owned(),
            }),
        }
    }

    /// Anon key with surrounding whitespace removed.
    ///
    /// # Errors
    ///
    /// Fails when the key is blank.
    pub fn anon_key(&self) -> Result<&str, SettingsError> {
        let key = self.anon_key.trim();
        if key.is_empty() {
            return Err(SettingsError::EmptyAnonKey);
        }
        Ok(key)
    }

    /// Request timeout.
    ///
    /// # Errors
    ///
    /// Fails for a zero timeout.
    pub fn request_timeout(&self) -> Result<Duration, SettingsError> {
        if self.request_timeout_secs == 0 {
            return Err(SettingsError::ZeroTimeout);
        }
        Ok(Duration::from_secs(self.request_timeout_secs))
    }

    /// Transaction table row cap, never zero.
    pub fn recent_transactions_limit(&self) -> usize {
        if self.recent_transactions_limit == 0 {
            DEFAULT_RECENT_LIMIT
        } else {
            self.recent_transactions_limit
        }
    }

    /// Log line format; compact unless `json_logs` is set.
    pub fn log_format(&self) -> LogFormat {
        LogFormat::from_flag(self.json_logs.unwrap_or(false))
    }

    /// Validated reset redirect, if configured.
    ///
    /// # Errors
    ///
    /// Fails when the configured value does not parse.
    pub fn password_reset_redirect(&self) -> Result<Option<Url>, SettingsError> {
        self.password_reset_redirect
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(|raw| parse_url("password_reset_redirect", raw))
            .transpose()
    }
}

fn parse_url(field: &'static str, raw: &str) -> Result<Url, SettingsError> {
    Url::parse(raw.trim()).map_err(|source| SettingsError::InvalidUrl { field, source })
}

#[cfg(test)]
mod tests {
    //! Unit tests for platform settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> PlatformSettings {
        PlatformSettings::load_from_iter([OsString::from("dashboard")])
            .expect("config should load")
    }

    fn settings(url: &str) -> PlatformSettings {
        PlatformSettings {
            supabase_url: url.to_owned(),
            anon_key: "anon".to_owned(),
            request_timeout_secs: 30,
            recent_transactions_limit: DEFAULT_RECENT_LIMIT,
            password_reset_redirect: None,
            json_logs: None,
        }
    }

    #[rstest]
    fn defaults_fill_optional_values() {
        let _guard = lock_env([
            ("ORION_SUPABASE_URL", Some("https://abc.supabase.co".to_owned())),
            ("ORION_ANON_KEY", Some("public-anon-key".to_owned())),
            ("ORION_REQUEST_TIMEOUT_SECS", None::<String>),
            ("ORION_RECENT_TRANSACTIONS_LIMIT", None::<String>),
            ("ORION_PASSWORD_RESET_REDIRECT", None::<String>),
            ("ORION_JSON_LOGS", None::<String>),
        ]);

        let loaded = load_from_empty_args();
        assert_eq!(
            loaded.supabase_url().expect("url").as_str(),
            "https://abc.supabase.co/"
        );
        assert_eq!(loaded.anon_key(), Ok("public-anon-key"));
        assert_eq!(loaded.request_timeout(), Ok(Duration::from_secs(30)));
        assert_eq!(loaded.recent_transactions_limit(), 200);
        assert_eq!(loaded.password_reset_redirect(), Ok(None));
        assert_eq!(loaded.log_format(), LogFormat::Compact);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("ORION_SUPABASE_URL", Some("http://localhost:54321".to_owned())),
            ("ORION_ANON_KEY", Some("local-key".to_owned())),
            ("ORION_REQUEST_TIMEOUT_SECS", Some("5".to_owned())),
            ("ORION_RECENT_TRANSACTIONS_LIMIT", Some("50".to_owned())),
            (
                "ORION_PASSWORD_RESET_REDIRECT",
                Some("http://localhost:3000/reset".to_owned()),
            ),
            ("ORION_JSON_LOGS", Some("true".to_owned())),
        ]);

        let loaded = load_from_empty_args();
        assert_eq!(loaded.request_timeout(), Ok(Duration::from_secs(5)));
        assert_eq!(loaded.recent_transactions_limit(), 50);
        assert_eq!(
            loaded
                .password_reset_redirect()
                .expect("redirect")
                .map(String::from),
            Some("http://localhost:3000/reset".to_owned())
        );
        assert_eq!(loaded.json_logs, Some(true));
        assert_eq!(loaded.log_format(), LogFormat::Json);
    }

    #[rstest]
    #[case("not a url")]
    #[case("")]
    fn malformed_urls_are_rejected(#[case] raw: &str) {
        assert!(matches!(
            settings(raw).supabase_url(),
            Err(SettingsError::InvalidUrl {
                field: "supabase_url",
                ..
            })
        ));
    }

    #[rstest]
    fn non_http_schemes_are_rejected() {
        assert_eq!(
            settings("ftp://abc.supabase.co").supabase_url(),
            Err(SettingsError::UnsupportedScheme {
                scheme: "ftp".to_owned()
            })
        );
    }

    #[rstest]
    fn blank_keys_and_zero_timeouts_are_rejected() {
        let mut invalid = settings("https://abc.supabase.co");
        invalid.anon_key = "   ".to_owned();
        invalid.request_timeout_secs = 0;
        assert_eq!(invalid.anon_key(), Err(SettingsError::EmptyAnonKey));
        assert_eq!(invalid.request_timeout(), Err(SettingsError::ZeroTimeout));
    }

    #[rstest]
    fn a_zero_row_cap_falls_back_to_the_default() {
        let mut zero = settings("https://abc.supabase.co");
        zero.recent_transactions_limit = 0;
        assert_eq!(zero.recent_transactions_limit(), DEFAULT_RECENT_LIMIT);
    }
}
