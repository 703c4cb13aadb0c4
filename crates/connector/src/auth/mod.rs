//! OAuth2 Authorization-Code handshake against LinkedIn.
//!
//! The flow, in call order:
//!
//! ```text
//! authorize::build_authorization_url   (issues a fresh CSRF state)
//!        │
//!        ▼  user consents in the browser, provider redirects back
//! callback::extract_state / extract_code
//!        │
//!        ▼  state compared against the pending handshake by the caller
//! exchange::exchange_code              (code → access token)
//! ```
//!
//! Every attempt carries its own [`authorize::HandshakeState`]; nothing in
//! this module keeps per-attempt state on an instance, so two attempts can
//! never bleed into each other.

pub mod authorize;
pub mod callback;
pub mod exchange;
pub mod state;
pub mod types;

pub use authorize::{build_authorization_url, HandshakeState};
pub use callback::{extract_code, extract_state};
pub use exchange::exchange_code;
pub use state::{generate_state, validate_state};
pub use types::{AccessToken, AccessTokenData, ConnectorConfig, ProviderErrorPayload};
