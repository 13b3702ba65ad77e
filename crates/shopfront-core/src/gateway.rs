//! Port through which the cart core talks to the remote cart service.
//!
//! Implementations perform no retries and no caching. Every mutating call
//! returns the full updated cart so the caller can replace its snapshot
//! wholesale.

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::{CartIdentity, CartLineInput, CartLineUpdate, CartSnapshot};

/// A business-rule rejection reported by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserError {
    /// Path to the offending input field, e.g. `["lines", "0", "quantity"]`.
    pub field: Vec<String>,
    pub message: String,
    pub code: Option<String>,
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Failure classes a gateway call can end in.
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    /// Transport-level failure: connection refused, timeout, TLS.
    #[error("network failure: {0}")]
    Network(String),

    /// The remote service rejected the request on business rules.
    #[error("request rejected: {}", join_messages(.0))]
    Validation(Vec<UserError>),

    /// The cart behind the held identity no longer exists.
    #[error("cart {0} not found")]
    NotFound(CartIdentity),

    /// The remote service answered, but not with a usable cart
    /// (non-2xx status, GraphQL errors, malformed payload).
    #[error("remote service failure: {0}")]
    Service(String),
}

impl RemoteError {
    /// `true` for failures that say nothing about whether the cart exists.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, RemoteError::Network(_) | RemoteError::Service(_))
    }
}

fn join_messages(errors: &[UserError]) -> String {
    if errors.is_empty() {
        return "no details given".to_string();
    }
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Remote cart operations consumed by the cart synchronization core.
pub trait CartGateway: Send + Sync {
    /// Creates a new remote cart, optionally seeded with lines.
    fn create_cart(
        &self,
        lines: &[CartLineInput],
    ) -> impl Future<Output = Result<CartSnapshot, RemoteError>> + Send;

    /// Fetches a cart by identity. `Ok(None)` means the cart does not exist
    /// (expired, completed, or never created).
    fn get_cart(
        &self,
        id: &CartIdentity,
    ) -> impl Future<Output = Result<Option<CartSnapshot>, RemoteError>> + Send;

    fn add_lines(
        &self,
        id: &CartIdentity,
        lines: &[CartLineInput],
    ) -> impl Future<Output = Result<CartSnapshot, RemoteError>> + Send;

    fn update_lines(
        &self,
        id: &CartIdentity,
        lines: &[CartLineUpdate],
    ) -> impl Future<Output = Result<CartSnapshot, RemoteError>> + Send;

    fn remove_lines(
        &self,
        id: &CartIdentity,
        line_ids: &[String],
    ) -> impl Future<Output = Result<CartSnapshot, RemoteError>> + Send;
}
