//! Request execution and credential capabilities.
//!
//! The connector never talks to the network directly from its flow logic;
//! it depends on two injected capabilities supplied by the hosting engine:
//!
//! - [`RequestExecutor`] performs the actual HTTP I/O for a described
//!   request (the production implementation is [`HttpExecutor`]),
//! - [`CredentialStore`] holds the engine's current access token and its
//!   scope-verification policy flag.
//!
//! These traits enable dependency injection and testing by abstracting the
//! external transport and token storage.

pub mod credentials;
pub mod decorator;
pub mod executor;
pub mod request;

use async_trait::async_trait;

pub use credentials::{suspend_scope_verification, CredentialStore, InMemoryCredentials,
    ScopeVerificationGuard};
pub use decorator::decorate;
pub use executor::HttpExecutor;
pub use request::{ApiRequest, ApiResponse};

use crate::error::TransportError;

/// Request-execution capability.
///
/// Implementations own the transport policy end to end: connection
/// handling, timeouts, and any retrying happen behind this trait, never in
/// the flow logic that calls it.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Execute one described request and return the raw response.
    ///
    /// # Errors
    /// Returns a transport error when the provider could not be reached;
    /// non-success HTTP statuses are NOT transport errors and come back as
    /// ordinary responses.
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}
