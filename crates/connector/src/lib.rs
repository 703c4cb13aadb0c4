//! LinkedIn OAuth2 connector for the LinkMesh engine.
//!
//! Implements the Authorization-Code handshake against LinkedIn and the
//! request decoration that authorizes subsequent API calls. The actual
//! HTTP I/O and token storage are capabilities injected by the hosting
//! engine; the connector supplies a reqwest-backed executor and an
//! in-memory credential store for hosts that don't bring their own.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │    Connector    │  High-level flow orchestrator
//! └────────┬────────┘
//!          │
//!          ├──► auth::authorize   (authorization URL + CSRF handshake)
//!          ├──► auth::callback    (redirect parsing)
//!          ├──► auth::exchange    (code → access token)
//!          ├──► profile::resolver (identity probe behind a new token)
//!          │         │
//!          │         └──► transport::decorator  (token + format injection)
//!          │
//!          └──► transport traits  (RequestExecutor, CredentialStore)
//! ```
//!
//! # Usage Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use linkmesh_connector::{Connector, ConnectorConfig, HttpExecutor, InMemoryCredentials};
//! use linkmesh_connector::auth::types::DEFAULT_API_BASE;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConnectorConfig::new(
//!         "your_app_id".to_string(),
//!         "your_app_secret".to_string(),
//!         "http://localhost:8888/callback".to_string(),
//!         ConnectorConfig::default_scopes(),
//!     );
//!
//!     let executor = Arc::new(HttpExecutor::new(DEFAULT_API_BASE)?);
//!     let credentials = Arc::new(InMemoryCredentials::new());
//!     let connector = Connector::new(config, executor, credentials);
//!
//!     // Start the login flow
//!     let (auth_url, handshake) = connector.start_login()?;
//!     println!("Open this URL in your browser: {auth_url}");
//!
//!     // ... user authorizes in browser, app receives the redirect ...
//!     let callback_url = "http://localhost:8888/callback?code=...&state=...";
//!
//!     // Complete the login: state check, token exchange, identity probe
//!     let outcome = connector.complete_login(handshake, callback_url).await?;
//!     println!("logged in: {outcome:?}");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - **[`auth`]**: handshake — state, authorization URL, callback, exchange
//! - **[`transport`]**: capability traits, request descriptors, decoration,
//!   the reqwest executor, and the in-memory credential store
//! - **[`profile`]**: profile model and identity resolution
//! - **[`service`]**: the high-level [`Connector`]
//! - **[`error`]**: failure taxonomy, one channel per failure class
//! - **[`testing`]**: scripted mocks for the capability traits

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod auth;
pub mod error;
pub mod profile;
pub mod service;
pub mod testing;
pub mod transport;

// Re-export commonly used types for convenience
// ------------------------------
pub use auth::authorize::{build_authorization_url, HandshakeState};
pub use auth::callback::{extract_code, extract_state};
pub use auth::exchange::exchange_code;
pub use auth::state::{generate_state, validate_state};
pub use auth::types::{AccessToken, AccessTokenData, ConnectorConfig, ProviderErrorPayload};
pub use error::{ConnectorError, ConnectorResult, TransportError};
pub use profile::model::Profile;
pub use profile::resolver::{fetch_profile, resolve_identity};
pub use service::{Connector, LoginOutcome};
pub use transport::{
    decorate, ApiRequest, ApiResponse, CredentialStore, HttpExecutor, InMemoryCredentials,
    RequestExecutor,
};
