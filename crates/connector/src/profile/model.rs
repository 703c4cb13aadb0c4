//! Read-only view over the raw profile JSON.

use serde_json::Value;

/// One resolved identity, as returned by the profile endpoint.
///
/// Immutable after construction; accessors project straight out of the
/// stored JSON and return `None` when a field is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    raw: Value,
}

impl Profile {
    /// Wrap a raw profile document.
    #[must_use]
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    /// The member id.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.raw.get("id").and_then(Value::as_str)
    }

    /// The member's last name.
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.raw.get("lastName").and_then(Value::as_str)
    }

    /// The full document as returned by the provider.
    #[must_use]
    pub fn json(&self) -> &Value {
        &self.raw
    }
}
