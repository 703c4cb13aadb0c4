//! Credential storage capability and the scope-verification guard.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use crate::auth::types::AccessToken;

/// Token storage capability provided by the hosting engine.
///
/// Besides the current credential, the store carries the engine's
/// scope-verification policy: when enabled, the engine checks that the
/// recorded grant covers an API call before dispatching it. The identity
/// probe that follows a token exchange runs before any grant is recorded,
/// so it suspends the policy for its own duration (see
/// [`suspend_scope_verification`]).
pub trait CredentialStore: Send + Sync {
    /// The credential currently installed, if any.
    fn current_token(&self) -> Option<AccessToken>;

    /// Install or clear the current credential.
    fn set_current_token(&self, token: Option<AccessToken>);

    /// Whether scope verification is currently enabled.
    fn scope_verification_enabled(&self) -> bool;

    /// Enable or disable scope verification.
    fn set_scope_verification(&self, enabled: bool);
}

/// In-memory credential store.
///
/// Tokens live for the process only; persistence across runs is the
/// hosting engine's concern, not the connector's.
#[derive(Debug)]
pub struct InMemoryCredentials {
    token: RwLock<Option<AccessToken>>,
    verify_scopes: AtomicBool,
}

impl InMemoryCredentials {
    /// Create an empty store with scope verification enabled.
    #[must_use]
    pub fn new() -> Self {
        Self { token: RwLock::new(None), verify_scopes: AtomicBool::new(true) }
    }
}

impl Default for InMemoryCredentials {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for InMemoryCredentials {
    fn current_token(&self) -> Option<AccessToken> {
        self.token.read().clone()
    }

    fn set_current_token(&self, token: Option<AccessToken>) {
        *self.token.write() = token;
    }

    fn scope_verification_enabled(&self) -> bool {
        self.verify_scopes.load(Ordering::SeqCst)
    }

    fn set_scope_verification(&self, enabled: bool) {
        self.verify_scopes.store(enabled, Ordering::SeqCst);
    }
}

/// Guard that keeps scope verification suspended while it lives.
///
/// Restores the previous setting on drop, so every exit path — success,
/// error return, panic unwind — reinstates the policy that was in force
/// before the suspension.
pub struct ScopeVerificationGuard<'a> {
    store: &'a dyn CredentialStore,
    previous: bool,
}

/// Suspend scope verification until the returned guard is dropped.
pub fn suspend_scope_verification(store: &dyn CredentialStore) -> ScopeVerificationGuard<'_> {
    let previous = store.scope_verification_enabled();
    store.set_scope_verification(false);
    ScopeVerificationGuard { store, previous }
}

impl Drop for ScopeVerificationGuard<'_> {
    fn drop(&mut self) {
        self.store.set_scope_verification(self.previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_starts_empty_with_verification_on() {
        let store = InMemoryCredentials::new();
        assert!(store.current_token().is_none());
        assert!(store.scope_verification_enabled());
    }

    #[test]
    fn token_roundtrip() {
        let store = InMemoryCredentials::new();

        store.set_current_token(Some(AccessToken::new("tok1")));
        assert_eq!(store.current_token().map(|t| t.value), Some("tok1".to_string()));

        store.set_current_token(None);
        assert!(store.current_token().is_none());
    }

    #[test]
    fn guard_suspends_and_restores() {
        let store = InMemoryCredentials::new();

        {
            let _guard = suspend_scope_verification(&store);
            assert!(!store.scope_verification_enabled());
        }
        assert!(store.scope_verification_enabled());
    }

    #[test]
    fn guard_restores_a_disabled_previous_setting() {
        let store = InMemoryCredentials::new();
        store.set_scope_verification(false);

        {
            let _guard = suspend_scope_verification(&store);
            assert!(!store.scope_verification_enabled());
        }
        // the policy was off before the suspension; it stays off
        assert!(!store.scope_verification_enabled());
    }

    #[test]
    fn guard_restores_on_panic() {
        let store = InMemoryCredentials::new();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = suspend_scope_verification(&store);
            panic!("probe blew up");
        }));

        assert!(result.is_err());
        assert!(store.scope_verification_enabled());
    }
}
