//! Identity resolution for freshly issued tokens.

use tracing::debug;

use crate::auth::types::AccessToken;
use crate::error::{ConnectorError, ConnectorResult};
use crate::profile::model::Profile;
use crate::transport::credentials::{suspend_scope_verification, CredentialStore};
use crate::transport::decorator::decorate;
use crate::transport::request::ApiRequest;
use crate::transport::RequestExecutor;

/// Profile ("who am I") endpoint path, relative to the API host.
pub const PROFILE_PATH: &str = "people/~";

/// Fetch the profile behind a freshly issued token.
///
/// The token is installed as the engine's current credential and stays
/// installed afterwards — labelling the new account is the first call the
/// token serves. Scope verification is suspended for the duration of the
/// probe, because the grant backing the token has not been recorded yet;
/// the previous setting is restored whether the fetch succeeds or fails.
///
/// # Errors
/// Transport, provider, and protocol failures are returned untouched. A
/// profile without a `lastName` is not an error; the field is simply
/// absent on the returned [`Profile`].
pub async fn resolve_identity(
    token: &AccessToken,
    executor: &dyn RequestExecutor,
    credentials: &dyn CredentialStore,
) -> ConnectorResult<Profile> {
    credentials.set_current_token(Some(token.clone()));

    let _verification = suspend_scope_verification(credentials);
    fetch_profile(executor, credentials).await
}

/// Decorated GET against the profile endpoint using the current credential.
///
/// # Errors
/// Fails with a configuration error when no credential is installed;
/// otherwise forwards executor and provider failures untouched.
pub async fn fetch_profile(
    executor: &dyn RequestExecutor,
    credentials: &dyn CredentialStore,
) -> ConnectorResult<Profile> {
    let token = credentials
        .current_token()
        .ok_or_else(|| ConnectorError::config("no access token installed; complete a login first"))?;

    let mut request = ApiRequest::get(PROFILE_PATH);
    decorate(&mut request, &token);

    let response = executor.execute(request).await?;

    if !response.is_success() {
        let payload = response.json()?;
        return Err(ConnectorError::Provider { status: response.status, payload });
    }

    let raw = response.json()?;
    debug!("profile fetched");
    Ok(Profile::new(raw))
}
