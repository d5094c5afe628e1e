//! # session-client
//!
//! Client side of cookie-based authentication: an observable identity cell
//! plus the calls that fill it.
//!
//! ```no_run
//! # async fn demo() -> Result<(), session_client::AuthError> {
//! use session_client::{AuthClient, ClientConfig, IdentityStore};
//!
//! let store = IdentityStore::new();
//! let _view = store.subscribe(|identity| println!("now: {identity:?}"));
//! let client = AuthClient::new(ClientConfig::from_env()?, store)?;
//! client.login("a@b.com", "secret").await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod identity;
pub mod store;

pub use client::AuthClient;
pub use config::ClientConfig;
pub use error::{AuthError, ErrorCode};
pub use identity::{Identity, SessionResponse, SessionSentinel, identity_from_response};
pub use store::{IdentityStore, Subscription};
