//! Redirect-callback parsing.
//!
//! The provider sends the user back to the configured redirect URI with
//! `code` and `state` query parameters on success, or an error indicator on
//! denial. Absence of a parameter is a soft outcome — the caller decides
//! whether "no code" means the user declined or the callback was malformed.

use url::Url;

/// Extract the authorization code from a callback URL.
///
/// Returns `None` when the `code` parameter is absent (user denied the
/// request, or the callback is malformed). Never an error: denial is not a
/// failure of the connector.
#[must_use]
pub fn extract_code(callback_url: &str) -> Option<String> {
    query_param(callback_url, "code")
}

/// Extract the echoed CSRF state from a callback URL.
///
/// The comparison against the pending handshake is the orchestrator's job;
/// this only recovers the raw value.
#[must_use]
pub fn extract_state(callback_url: &str) -> Option<String> {
    query_param(callback_url, "state")
}

fn query_param(callback_url: &str, name: &str) -> Option<String> {
    // Callback handlers frequently see only the path-and-query part of the
    // request; resolve those against a placeholder origin.
    let parsed = Url::parse(callback_url)
        .or_else(|_| Url::parse("http://localhost").and_then(|base| base.join(callback_url)))
        .ok()?;

    parsed
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
