//! Identity model and the session-absence decision.
//!
//! DESIGN
//! ======
//! Servers have signalled "no session" in more than one way: a null `email`,
//! an empty `email`, or (preferred) an explicit `authenticated` flag. The
//! convention is chosen per client through [`SessionSentinel`] instead of
//! being baked into the fetch path.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// The current user's identity, or its absence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Identity {
    /// Identity with both fields unset.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn authenticated(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self { email: Some(email.into()), name: Some(name.into()) }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.email.is_some()
    }
}

/// Body of `GET /auth/session`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SessionResponse {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Explicit session flag. `false` always means no session; `true` wins
    /// over the email sentinel only when an email is present.
    #[serde(default)]
    pub authenticated: Option<bool>,
}

/// Which `email` values mean "no session".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionSentinel {
    /// Null or missing email.
    Null,
    /// Empty or missing email.
    Empty,
    /// Null, missing, or empty email.
    #[default]
    NullOrEmpty,
}

impl SessionSentinel {
    fn is_absent(self, email: Option<&str>) -> bool {
        match (self, email) {
            (_, None) => true,
            (Self::Null, Some(_)) => false,
            (Self::Empty | Self::NullOrEmpty, Some(email)) => email.is_empty(),
        }
    }
}

impl FromStr for SessionSentinel {
    type Err = AuthError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "null" => Ok(Self::Null),
            "empty" => Ok(Self::Empty),
            "null-or-empty" | "null_or_empty" => Ok(Self::NullOrEmpty),
            other => Err(AuthError::Config(format!(
                "unknown session sentinel '{other}' (expected 'null', 'empty' or 'null-or-empty')"
            ))),
        }
    }
}

/// Decide the identity a session response describes.
#[must_use]
pub fn identity_from_response(response: &SessionResponse, sentinel: SessionSentinel) -> Identity {
    // A `true` flag without an email cannot describe a user, so it falls
    // through to the sentinel, which treats a missing email as no session.
    let logged_in = match response.authenticated {
        Some(false) => false,
        Some(true) if response.email.is_some() => true,
        _ => !sentinel.is_absent(response.email.as_deref()),
    };
    if !logged_in {
        return Identity::anonymous();
    }
    Identity { email: response.email.clone(), name: response.name.clone() }
}

#[cfg(test)]
#[path = "identity_test.rs"]
mod tests;
