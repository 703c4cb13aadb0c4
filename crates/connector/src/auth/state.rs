//! CSRF state tokens for the authorization redirect.
//!
//! The state parameter is an opaque random value round-tripped through the
//! provider's redirect; the callback handler must see the exact value that
//! was issued or the authorization attempt is rejected.

use rand::RngCore;

/// Entropy carried by each state token, in bytes.
pub const STATE_ENTROPY_BYTES: usize = 16;

/// Generate a random state token for CSRF protection.
///
/// Returns a hex-encoded string drawn from 16 bytes of cryptographically
/// secure randomness (32 characters). Values never repeat within any
/// practically observable number of calls.
#[must_use]
pub fn generate_state() -> String {
    let mut bytes = [0u8; STATE_ENTROPY_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Validate that the state token matches
///
/// # Arguments
/// * `expected` - The state that was sent in the authorization request
/// * `actual` - The state received in the callback
///
/// # Returns
/// `true` if states match, `false` otherwise
#[must_use]
pub fn validate_state(expected: &str, actual: &str) -> bool {
    expected == actual
}
