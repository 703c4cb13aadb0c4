//! Configuration and wire types for the handshake.
//!
//! `ConnectorConfig` describes one registered application/user pair and is
//! immutable for the lifetime of an authentication session. The wire types
//! mirror what LinkedIn's token endpoint actually returns: a JSON object
//! with `access_token` on success, an arbitrary JSON error object on
//! rejection.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ConnectorError, ConnectorResult};

/// Authorization host used when none is configured.
pub const DEFAULT_AUTH_BASE: &str = "https://www.linkedin.com";

/// API host (including version prefix) used when none is configured.
pub const DEFAULT_API_BASE: &str = "https://api.linkedin.com/v1";

/// Client configuration for one registered application profile.
///
/// Owned by the caller and passed by reference into each component; nothing
/// in the connector mutates it after construction.
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    /// OAuth client id of the registered application
    pub app_id: String,

    /// OAuth client secret of the registered application
    pub app_secret: String,

    /// Redirect URI the provider sends the user back to
    pub redirect_uri: String,

    /// Scopes requested during authorization
    pub scopes: Vec<String>,

    /// Base URL of the authorization host
    pub auth_base: String,

    /// Base URL of the API host, including the version prefix
    pub api_base: String,
}

impl ConnectorConfig {
    /// Create a configuration with the default LinkedIn hosts.
    #[must_use]
    pub fn new(
        app_id: String,
        app_secret: String,
        redirect_uri: String,
        scopes: Vec<String>,
    ) -> Self {
        Self {
            app_id,
            app_secret,
            redirect_uri,
            scopes,
            auth_base: DEFAULT_AUTH_BASE.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// The scope set requested when the caller does not name one.
    #[must_use]
    pub fn default_scopes() -> Vec<String> {
        ["r_basicprofile", "r_emailaddress", "rw_company_admin", "w_share"]
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Override the authorization host (tests point this at a mock server).
    #[must_use]
    pub fn with_auth_base(mut self, auth_base: impl Into<String>) -> Self {
        self.auth_base = auth_base.into();
        self
    }

    /// Override the API host.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Get the authorization endpoint URL.
    #[must_use]
    pub fn authorization_url(&self) -> String {
        format!("{}/oauth/v2/authorization", self.auth_base.trim_end_matches('/'))
    }

    /// Get the token endpoint URL.
    #[must_use]
    pub fn token_url(&self) -> String {
        format!("{}/oauth/v2/accessToken", self.auth_base.trim_end_matches('/'))
    }

    /// Check that the fields the handshake depends on are present.
    ///
    /// # Errors
    /// Returns a configuration error naming the first missing field.
    pub fn validate(&self) -> ConnectorResult<()> {
        if self.app_id.is_empty() {
            return Err(ConnectorError::config_field("must not be empty", "app_id"));
        }
        if self.redirect_uri.is_empty() {
            return Err(ConnectorError::config_field("must not be empty", "redirect_uri"));
        }
        Ok(())
    }
}

/// Token response from the provider's token endpoint.
///
/// LinkedIn answers `{"access_token": "...", "expires_in": ...}`; both the
/// token type and expiry are carried for completeness but the connector
/// treats a token as valid until it is explicitly replaced.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenData {
    /// The bearer credential
    pub access_token: String,

    /// Token type, when the provider reports one
    #[serde(default)]
    pub token_type: Option<String>,

    /// Reported lifetime in seconds (not tracked by the connector)
    #[serde(default)]
    pub expires_in: Option<i64>,
}

impl AccessTokenData {
    /// Project the wire response into the credential used for API calls.
    ///
    /// LinkedIn v1 reports no usable token type, so the projection falls
    /// back to the empty string.
    #[must_use]
    pub fn into_access_token(self) -> AccessToken {
        AccessToken {
            value: self.access_token,
            token_type: self.token_type.unwrap_or_default(),
        }
    }
}

/// Bearer credential injected into outbound API calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// The raw token value
    pub value: String,

    /// Token type as reported at exchange time (empty for LinkedIn v1)
    pub token_type: String,
}

impl AccessToken {
    /// Create a token with an empty type.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into(), token_type: String::new() }
    }
}

/// JSON error object returned by the provider with a non-success status.
///
/// The provider does not commit to a fixed shape, so the raw JSON is kept
/// and the common OAuth2 fields are exposed as accessors.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct ProviderErrorPayload(Value);

impl ProviderErrorPayload {
    /// The `error` code, when present.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.0.get("error").and_then(Value::as_str)
    }

    /// The `error_description`, when present.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.0.get("error_description").and_then(Value::as_str)
    }

    /// The full payload as returned by the provider.
    #[must_use]
    pub fn json(&self) -> &Value {
        &self.0
    }
}

impl fmt::Display for ProviderErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.error(), self.description()) {
            (Some(error), Some(desc)) => write!(f, "{error}: {desc}"),
            (Some(error), None) => write!(f, "{error}"),
            _ => write!(f, "{}", self.0),
        }
    }
}
