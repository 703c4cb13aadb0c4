//! High-level connector orchestrating the authentication flow.
//!
//! Combines URL building, callback handling, token exchange, and identity
//! resolution behind two calls: [`Connector::start_login`] hands out the
//! authorization URL together with the per-attempt [`HandshakeState`], and
//! [`Connector::complete_login`] consumes that state when the provider
//! redirects back.

use std::sync::Arc;

use tracing::info;

use crate::auth::authorize::{build_authorization_url, HandshakeState};
use crate::auth::callback::{extract_code, extract_state};
use crate::auth::exchange::exchange_code;
use crate::auth::types::{AccessToken, ConnectorConfig};
use crate::error::{ConnectorError, ConnectorResult};
use crate::profile::model::Profile;
use crate::profile::resolver::{fetch_profile, resolve_identity};
use crate::transport::credentials::CredentialStore;
use crate::transport::RequestExecutor;

/// Outcome of a completed login attempt.
#[derive(Debug)]
pub enum LoginOutcome {
    /// The provider issued a token and the identity behind it was resolved.
    Authorized {
        /// The freshly issued credential (also installed as the engine's
        /// current token)
        token: AccessToken,
        /// The resolved profile
        profile: Profile,
        /// Human-recognizable label for the account — the profile's last
        /// name when the provider reported one
        label: Option<String>,
    },

    /// The callback carried no authorization code: the user denied the
    /// request, or the callback was malformed. Not a failure.
    Denied,
}

/// LinkedIn connector bound to one application/user pair.
///
/// Holds the immutable configuration and the two capabilities injected by
/// the hosting engine. Carries no per-attempt state: each authorization
/// attempt lives in the [`HandshakeState`] value threaded through
/// `start_login` → `complete_login`, so concurrent attempts cannot
/// interfere through the connector itself.
pub struct Connector {
    config: ConnectorConfig,
    executor: Arc<dyn RequestExecutor>,
    credentials: Arc<dyn CredentialStore>,
}

impl Connector {
    /// Create a connector from a configuration and the engine capabilities.
    #[must_use]
    pub fn new(
        config: ConnectorConfig,
        executor: Arc<dyn RequestExecutor>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        Self { config, executor, credentials }
    }

    /// The configuration this connector was built with.
    #[must_use]
    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    /// Start a login attempt with the configured scopes.
    ///
    /// Returns the authorization URL to open in a browser and the handshake
    /// context the caller must hand back to [`Self::complete_login`].
    ///
    /// # Errors
    /// Returns a configuration error when required fields are missing.
    pub fn start_login(&self) -> ConnectorResult<(String, HandshakeState)> {
        let (url, handshake) = build_authorization_url(&self.config, None)?;
        info!("generated authorization URL");
        Ok((url, handshake))
    }

    /// Start a login attempt requesting an explicit scope set.
    ///
    /// # Errors
    /// Returns a configuration error when required fields are missing.
    pub fn start_login_with_scopes(
        &self,
        scopes: &[String],
    ) -> ConnectorResult<(String, HandshakeState)> {
        let (url, handshake) = build_authorization_url(&self.config, Some(scopes))?;
        info!("generated authorization URL");
        Ok((url, handshake))
    }

    /// Complete a login attempt from the provider's redirect callback.
    ///
    /// The echoed `state` is compared against the handshake before anything
    /// else happens; a mismatch is a hard failure and no token exchange is
    /// attempted. A callback without a `code` is the user's denial and
    /// resolves to [`LoginOutcome::Denied`]. Otherwise the code is
    /// exchanged, the new token is installed as the current credential, and
    /// the identity behind it is resolved for labelling.
    ///
    /// # Errors
    /// - `StateMismatch` — the callback's state is absent or differs from
    ///   the pending handshake
    /// - `Transport` / `Provider` / `Protocol` — forwarded from the
    ///   exchange and the identity probe
    pub async fn complete_login(
        &self,
        handshake: HandshakeState,
        callback_url: &str,
    ) -> ConnectorResult<LoginOutcome> {
        let echoed = extract_state(callback_url).unwrap_or_default();
        if !handshake.matches(&echoed) {
            return Err(ConnectorError::StateMismatch {
                expected: handshake.into_csrf_token(),
                received: echoed,
            });
        }

        let Some(code) = extract_code(callback_url) else {
            info!("authorization callback carried no code");
            return Ok(LoginOutcome::Denied);
        };

        let data = exchange_code(&code, &self.config, self.executor.as_ref()).await?;
        let token = data.into_access_token();

        let profile =
            resolve_identity(&token, self.executor.as_ref(), self.credentials.as_ref()).await?;
        let label = profile.last_name().map(str::to_owned);

        info!("login completed");

        Ok(LoginOutcome::Authorized { token, profile, label })
    }

    /// Fetch the profile of the currently authorized user.
    ///
    /// # Errors
    /// Fails with a configuration error when no credential is installed;
    /// network and provider failures are forwarded untouched.
    pub async fn me(&self) -> ConnectorResult<Profile> {
        fetch_profile(self.executor.as_ref(), self.credentials.as_ref()).await
    }
}

impl std::fmt::Debug for Connector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connector").field("app_id", &self.config.app_id).finish()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for service.
    use super::*;
    use crate::auth::exchange::TOKEN_PATH;
    use crate::profile::resolver::PROFILE_PATH;
    use crate::testing::mocks::MockExecutor;
    use crate::transport::credentials::InMemoryCredentials;

    fn test_connector() -> (Connector, Arc<MockExecutor>, Arc<InMemoryCredentials>) {
        let config = ConnectorConfig::new(
            "test_app_id".to_string(),
            "test_app_secret".to_string(),
            "http://localhost:3000/callback".to_string(),
            vec!["r_basicprofile".to_string()],
        );
        let executor = Arc::new(MockExecutor::new());
        let credentials = Arc::new(InMemoryCredentials::new());
        let connector = Connector::new(config, executor.clone(), credentials.clone());
        (connector, executor, credentials)
    }

    fn callback(code: Option<&str>, state: &str) -> String {
        match code {
            Some(code) => {
                format!("http://localhost:3000/callback?code={code}&state={state}")
            }
            None => {
                format!("http://localhost:3000/callback?error=access_denied&state={state}")
            }
        }
    }

    /// Validates `Connector::start_login` behavior.
    ///
    /// Assertions:
    /// - Ensures the URL targets the authorization endpoint and embeds the
    ///   returned handshake's state.
    #[tokio::test]
    async fn test_start_login() {
        let (connector, _, _) = test_connector();

        let (url, handshake) = connector.start_login().unwrap();

        assert!(url.starts_with("https://www.linkedin.com/oauth/v2/authorization?"));
        assert!(url.contains(&format!("state={}", handshake.csrf_token())));
        assert!(url.contains("scope=r_basicprofile"));
    }

    /// Validates `Connector::complete_login` behavior for the full
    /// successful flow.
    ///
    /// Assertions:
    /// - Confirms the outcome carries the token, profile, and label.
    /// - Ensures the new token was installed as the current credential.
    /// - Ensures scope verification ended up re-enabled.
    #[tokio::test]
    async fn test_complete_login_success() {
        let (connector, executor, credentials) = test_connector();
        executor.add_response(TOKEN_PATH, 200, r#"{"access_token":"tok1"}"#);
        executor.add_response(PROFILE_PATH, 200, r#"{"id":"42","lastName":"Doe"}"#);

        let (_, handshake) = connector.start_login().unwrap();
        let url = callback(Some("ABC123"), handshake.csrf_token());

        let outcome = connector.complete_login(handshake, &url).await.unwrap();

        match outcome {
            LoginOutcome::Authorized { token, profile, label } => {
                assert_eq!(token.value, "tok1");
                assert_eq!(profile.id(), Some("42"));
                assert_eq!(label.as_deref(), Some("Doe"));
            }
            LoginOutcome::Denied => panic!("expected authorized outcome"),
        }

        assert_eq!(
            credentials.current_token().map(|t| t.value),
            Some("tok1".to_string())
        );
        assert!(credentials.scope_verification_enabled());
    }

    /// Validates `Connector::complete_login` behavior for the forged-state
    /// scenario.
    ///
    /// Assertions:
    /// - Ensures a mismatched state is a hard failure.
    /// - Ensures the token endpoint was never called.
    #[tokio::test]
    async fn test_complete_login_state_mismatch() {
        let (connector, executor, _) = test_connector();
        executor.add_response(TOKEN_PATH, 200, r#"{"access_token":"tok1"}"#);

        let (_, handshake) = connector.start_login().unwrap();
        let url = callback(Some("ABC123"), "forged_state");

        let result = connector.complete_login(handshake, &url).await;

        assert!(matches!(result, Err(ConnectorError::StateMismatch { .. })));
        assert!(!executor.was_called(TOKEN_PATH));
    }

    /// Validates `Connector::complete_login` behavior for the missing-state
    /// scenario.
    #[tokio::test]
    async fn test_complete_login_missing_state() {
        let (connector, executor, _) = test_connector();

        let (_, handshake) = connector.start_login().unwrap();

        let result = connector
            .complete_login(handshake, "http://localhost:3000/callback?code=ABC123")
            .await;

        assert!(matches!(result, Err(ConnectorError::StateMismatch { .. })));
        assert!(executor.requests().is_empty());
    }

    /// Validates `Connector::complete_login` behavior for the denial
    /// scenario.
    ///
    /// Assertions:
    /// - Ensures a codeless callback with a valid state resolves to
    ///   `Denied` rather than an error.
    #[tokio::test]
    async fn test_complete_login_denied() {
        let (connector, executor, _) = test_connector();

        let (_, handshake) = connector.start_login().unwrap();
        let url = callback(None, handshake.csrf_token());

        let outcome = connector.complete_login(handshake, &url).await.unwrap();

        assert!(matches!(outcome, LoginOutcome::Denied));
        assert!(executor.requests().is_empty());
    }

    /// Validates `Connector::complete_login` behavior for the rejected-code
    /// scenario.
    #[tokio::test]
    async fn test_complete_login_provider_rejection() {
        let (connector, executor, credentials) = test_connector();
        executor.add_response(TOKEN_PATH, 401, r#"{"error":"invalid_grant"}"#);

        let (_, handshake) = connector.start_login().unwrap();
        let url = callback(Some("ABC123"), handshake.csrf_token());

        let result = connector.complete_login(handshake, &url).await;

        match result {
            Err(ConnectorError::Provider { payload, .. }) => {
                assert_eq!(payload.error(), Some("invalid_grant"));
            }
            other => panic!("expected provider error, got {other:?}"),
        }
        // a rejected exchange never installs a credential
        assert!(credentials.current_token().is_none());
    }

    /// Validates `Connector::me` behavior.
    #[tokio::test]
    async fn test_me_uses_current_credential() {
        let (connector, executor, credentials) = test_connector();
        executor.add_response(PROFILE_PATH, 200, r#"{"id":"42","lastName":"Doe"}"#);
        credentials.set_current_token(Some(AccessToken::new("tok1")));

        let profile = connector.me().await.unwrap();

        assert_eq!(profile.last_name(), Some("Doe"));
        let request = executor.last_request().unwrap();
        assert_eq!(
            request.query.get("oauth2_access_token").map(String::as_str),
            Some("tok1")
        );
    }

    #[tokio::test]
    async fn test_me_without_login_is_a_config_error() {
        let (connector, _, _) = test_connector();

        let result = connector.me().await;
        assert!(matches!(result, Err(ConnectorError::Config { .. })));
    }
}
