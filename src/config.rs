//! Client configuration parsed from environment variables.

use std::time::Duration;

use crate::error::AuthError;
use crate::identity::SessionSentinel;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

pub const BASE_URL_ENV: &str = "SESSION_CLIENT_BASE_URL";
pub const SENTINEL_ENV: &str = "SESSION_CLIENT_SENTINEL";
pub const REQUEST_TIMEOUT_ENV: &str = "SESSION_CLIENT_REQUEST_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin the auth routes are mounted under, without a trailing slash.
    pub base_url: String,
    pub sentinel: SessionSentinel,
    /// `None` waits for the server indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            sentinel: SessionSentinel::default(),
            request_timeout: None,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(&base_url.into());
        self
    }

    #[must_use]
    pub fn with_sentinel(mut self, sentinel: SessionSentinel) -> Self {
        self.sentinel = sentinel;
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `SESSION_CLIENT_BASE_URL`: default `http://127.0.0.1:3000`
    /// - `SESSION_CLIENT_SENTINEL`: `null`, `empty` or `null-or-empty` (default)
    /// - `SESSION_CLIENT_REQUEST_TIMEOUT_SECS`: unset means no timeout
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Config`] if a variable is set but unparseable.
    pub fn from_env() -> Result<Self, AuthError> {
        let base_url = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let sentinel = match std::env::var(SENTINEL_ENV) {
            Ok(raw) => raw.parse()?,
            Err(_) => SessionSentinel::default(),
        };
        let request_timeout = parse_timeout(std::env::var(REQUEST_TIMEOUT_ENV).ok().as_deref())?;

        Ok(Self { base_url: normalize_base_url(&base_url), sentinel, request_timeout })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn parse_timeout(raw: Option<&str>) -> Result<Option<Duration>, AuthError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u64>()
        .map(|secs| Some(Duration::from_secs(secs)))
        .map_err(|_| AuthError::Config(format!("invalid {REQUEST_TIMEOUT_ENV}: '{raw}'")))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
