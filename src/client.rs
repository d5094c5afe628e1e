//! HTTP client for the session and login endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthClient` owns a cookie-carrying `reqwest::Client`, so the session
//! cookie set by `POST /auth/login` is replayed on later `GET /auth/session`
//! calls the way a browser replays same-origin credentials.
//!
//! ERROR HANDLING
//! ==============
//! HTTP status codes are not interpreted: the body is parsed whatever the
//! status, and only transport or JSON failures surface as errors. On any
//! error the identity store keeps its previous value.

use reqwest::header::ACCEPT;
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::AuthError;
use crate::identity::{Identity, SessionResponse, identity_from_response};
use crate::store::IdentityStore;

pub const SESSION_PATH: &str = "/auth/session";
pub const LOGIN_PATH: &str = "/auth/login";
pub const HEALTH_PATH: &str = "/health";

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Talks to the auth server and mirrors the session into an [`IdentityStore`].
#[derive(Clone, Debug)]
pub struct AuthClient {
    http: reqwest::Client,
    config: ClientConfig,
    store: IdentityStore,
}

impl AuthClient {
    /// # Errors
    ///
    /// Returns [`AuthError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig, store: IdentityStore) -> Result<Self, AuthError> {
        let mut builder = reqwest::Client::builder().cookie_store(true);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AuthError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config, store })
    }

    #[must_use]
    pub fn store(&self) -> &IdentityStore {
        &self.store
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Ask the server who the ambient credentials belong to and write the
    /// answer into the store.
    ///
    /// # Errors
    ///
    /// [`AuthError::Transport`] if the request fails, [`AuthError::Parse`] if
    /// the body is not a session object. The store is untouched on error.
    #[tracing::instrument(level = "debug", skip(self), fields(base_url = %self.config.base_url))]
    pub async fn refresh_session(&self) -> Result<Identity, AuthError> {
        tracing::debug!("fetching session");
        let body = read_body(self.http.get(self.config.url(SESSION_PATH))).await?;
        let response: SessionResponse = serde_json::from_str(&body).map_err(|e| AuthError::Parse(e.to_string()))?;

        let identity = identity_from_response(&response, self.config.sentinel);
        tracing::debug!(authenticated = identity.is_authenticated(), sentinel = ?self.config.sentinel, "session resolved");
        self.store.set(identity.clone());
        Ok(identity)
    }

    /// Post credentials and return the server's JSON reply unchanged.
    ///
    /// Does not update the store; call [`AuthClient::refresh_session`]
    /// afterwards, or use [`AuthClient::login`].
    ///
    /// # Errors
    ///
    /// [`AuthError::Transport`] if the request fails, [`AuthError::Parse`] if
    /// the body is not JSON.
    #[tracing::instrument(level = "debug", skip(self, password))]
    pub async fn post_login(&self, email: &str, password: &str) -> Result<Value, AuthError> {
        let request = self
            .http
            .post(self.config.url(LOGIN_PATH))
            .header(ACCEPT, "application/json")
            .json(&LoginRequest { email, password });
        let body = read_body(request).await?;
        serde_json::from_str(&body).map_err(|e| AuthError::Parse(e.to_string()))
    }

    /// [`AuthClient::post_login`] followed by [`AuthClient::refresh_session`].
    ///
    /// The refresh runs whatever the login reply says, so the store ends up
    /// reflecting the server's view of the session.
    ///
    /// # Errors
    ///
    /// Returns the first error from either request. A failed login skips the
    /// refresh.
    #[tracing::instrument(level = "debug", skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Value, AuthError> {
        let reply = self.post_login(email, password).await?;
        self.refresh_session().await?;
        Ok(reply)
    }

    /// Whether `GET /health` answers with a 2xx status.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Transport`] if the server cannot be reached.
    #[tracing::instrument(level = "debug", skip(self), fields(base_url = %self.config.base_url))]
    pub async fn health(&self) -> Result<bool, AuthError> {
        let response = self
            .http
            .get(self.config.url(HEALTH_PATH))
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "health response received");
        Ok(status.is_success())
    }
}

async fn read_body(request: reqwest::RequestBuilder) -> Result<String, AuthError> {
    let response = request
        .send()
        .await
        .map_err(|e| AuthError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    tracing::debug!(status, url = %response.url(), "auth response received");
    response
        .text()
        .await
        .map_err(|e| AuthError::Transport(e.to_string()))
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
