//! Authorization-code exchange against the provider's token endpoint.

use tracing::debug;

use crate::auth::types::{AccessTokenData, ConnectorConfig, ProviderErrorPayload};
use crate::error::{ConnectorError, ConnectorResult};
use crate::transport::decorator::{FORMAT_HEADER, FORMAT_JSON};
use crate::transport::request::ApiRequest;
use crate::transport::RequestExecutor;

/// Token endpoint path on the authorization host.
pub const TOKEN_PATH: &str = "oauth/v2/accessToken";

/// Exchange an authorization code for an access token.
///
/// Success and failure are keyed off the HTTP status: a success status
/// yields the parsed token data, any other status yields the provider's
/// JSON error payload on its own channel so callers can tell "provider
/// rejected the credentials" apart from "provider unreachable".
///
/// # Errors
/// - `Transport` — the endpoint could not be reached; forwarded verbatim,
///   never retried here
/// - `Provider` — non-success status with a JSON error body
/// - `Protocol` — a body (either branch) that is not valid JSON
/// - `Config` — the configuration is missing required fields
pub async fn exchange_code(
    code: &str,
    config: &ConnectorConfig,
    executor: &dyn RequestExecutor,
) -> ConnectorResult<AccessTokenData> {
    config.validate()?;

    let request = ApiRequest::post(TOKEN_PATH)
        .with_base_url(config.auth_base.clone())
        .header(FORMAT_HEADER, FORMAT_JSON)
        .form(vec![
            ("grant_type".to_string(), "authorization_code".to_string()),
            ("code".to_string(), code.to_string()),
            ("redirect_uri".to_string(), config.redirect_uri.clone()),
            ("client_id".to_string(), config.app_id.clone()),
            ("client_secret".to_string(), config.app_secret.clone()),
        ]);

    let response = executor.execute(request).await?;

    if response.is_success() {
        let data: AccessTokenData = response.json()?;
        debug!("authorization code exchanged for access token");
        Ok(data)
    } else {
        let payload: ProviderErrorPayload = response.json()?;
        Err(ConnectorError::Provider { status: response.status, payload })
    }
}
