//! Authorization URL composition.
//!
//! Building the URL issues a fresh [`HandshakeState`]; the caller holds on
//! to it and hands it back when the provider redirects to the callback.
//! Each call produces an independent state, so building a second URL
//! invalidates nothing except the caller's own bookkeeping — there is no
//! shared pending-handshake slot to overwrite.

use crate::auth::state::{generate_state, validate_state};
use crate::auth::types::ConnectorConfig;
use crate::error::ConnectorResult;

/// Per-attempt handshake context.
///
/// Deliberately not `Clone`: the value is issued by
/// [`build_authorization_url`] and consumed exactly once when the callback
/// is handled, which keeps every authorization attempt single-use.
#[derive(Debug)]
pub struct HandshakeState {
    csrf_token: String,
}

impl HandshakeState {
    fn issue() -> Self {
        Self { csrf_token: generate_state() }
    }

    /// The CSRF token embedded in the authorization URL.
    #[must_use]
    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }

    /// Compare the state echoed by the callback against this handshake.
    #[must_use]
    pub fn matches(&self, echoed: &str) -> bool {
        validate_state(&self.csrf_token, echoed)
    }

    /// Consume the handshake, yielding the token it carried.
    #[must_use]
    pub fn into_csrf_token(self) -> String {
        self.csrf_token
    }
}

/// Build the provider authorization URL for a consent redirect.
///
/// `scopes` falls back to the configured scope set when `None`. Scope
/// values are percent-encoded individually and joined with `%20`, the
/// separator the provider expects.
///
/// # Errors
/// Returns a configuration error when `app_id` or `redirect_uri` is
/// missing. Never touches the network.
pub fn build_authorization_url(
    config: &ConnectorConfig,
    scopes: Option<&[String]>,
) -> ConnectorResult<(String, HandshakeState)> {
    config.validate()?;

    let handshake = HandshakeState::issue();

    let params = [
        ("response_type", "code".to_string()),
        ("redirect_uri", urlencoding::encode(&config.redirect_uri).into_owned()),
        ("client_id", urlencoding::encode(&config.app_id).into_owned()),
        ("state", handshake.csrf_token().to_string()),
        ("scope", scope_param(scopes.unwrap_or(&config.scopes))),
    ];

    let query = params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let url = format!("{}?{}", config.authorization_url(), query);

    Ok((url, handshake))
}

fn scope_param(scopes: &[String]) -> String {
    scopes
        .iter()
        .map(|s| urlencoding::encode(s).into_owned())
        .collect::<Vec<_>>()
        .join("%20")
}

#[cfg(test)]
mod tests {
    //! Unit tests for auth::authorize.
    use super::*;

    fn test_config() -> ConnectorConfig {
        ConnectorConfig::new(
            "test_app_id".to_string(),
            "test_app_secret".to_string(),
            "http://localhost:3000/callback".to_string(),
            vec!["r_basicprofile".to_string(), "r_emailaddress".to_string()],
        )
    }

    /// Validates `build_authorization_url` behavior for the URL composition
    /// scenario.
    ///
    /// Assertions:
    /// - Ensures the URL targets the authorization endpoint.
    /// - Ensures `response_type=code`, the encoded redirect URI, and the
    ///   client id are present.
    /// - Ensures the `state` parameter appears exactly once and equals the
    ///   returned handshake's token.
    #[test]
    fn test_build_authorization_url() {
        let config = test_config();
        let (url, handshake) = build_authorization_url(&config, None).unwrap();

        assert!(url.starts_with("https://www.linkedin.com/oauth/v2/authorization?"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fcallback"));
        assert!(url.contains("client_id=test_app_id"));
        assert!(url.contains(&format!("state={}", handshake.csrf_token())));
        assert_eq!(url.matches("state=").count(), 1);
    }

    /// Validates `build_authorization_url` behavior for the scope joining
    /// scenario.
    ///
    /// Assertions:
    /// - Ensures configured scopes are joined with the `%20` separator.
    /// - Ensures an explicit scope list overrides the configured one.
    #[test]
    fn test_scope_joining() {
        let config = test_config();

        let (url, _) = build_authorization_url(&config, None).unwrap();
        assert!(url.contains("scope=r_basicprofile%20r_emailaddress"));

        let scopes = vec!["w_share".to_string()];
        let (url, _) = build_authorization_url(&config, Some(&scopes)).unwrap();
        assert!(url.contains("scope=w_share"));
        assert!(!url.contains("r_basicprofile"));
    }

    /// Validates `build_authorization_url` behavior for the repeated-call
    /// scenario.
    ///
    /// Assertions:
    /// - Ensures two sequential builds issue distinct states, so the second
    ///   URL never carries a stale token.
    #[test]
    fn test_sequential_builds_issue_fresh_state() {
        let config = test_config();

        let (first_url, first) = build_authorization_url(&config, None).unwrap();
        let (second_url, second) = build_authorization_url(&config, None).unwrap();

        assert_ne!(first.csrf_token(), second.csrf_token());
        assert!(first_url.contains(first.csrf_token()));
        assert!(second_url.contains(second.csrf_token()));
        assert!(!second_url.contains(first.csrf_token()));
    }

    /// Validates `build_authorization_url` behavior for the malformed
    /// configuration scenario.
    #[test]
    fn test_missing_configuration_is_an_error() {
        let mut config = test_config();
        config.redirect_uri.clear();

        let result = build_authorization_url(&config, None);
        assert!(matches!(result, Err(crate::error::ConnectorError::Config { .. })));
    }

    #[test]
    fn test_handshake_matching() {
        let (_, handshake) = build_authorization_url(&test_config(), None).unwrap();
        let token = handshake.csrf_token().to_string();

        assert!(handshake.matches(&token));
        assert!(!handshake.matches("forged"));
        assert_eq!(handshake.into_csrf_token(), token);
    }
}
