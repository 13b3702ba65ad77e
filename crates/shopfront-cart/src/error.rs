use shopfront_core::RemoteError;
use thiserror::Error;

/// Failure of a cart mutation, returned to the caller that issued it.
#[derive(Debug, Clone, Error)]
pub enum CartError {
    /// The operation needs an existing cart and there is none.
    #[error("no active cart")]
    NoActiveCart,

    #[error("invalid quantity {quantity}: {reason}")]
    InvalidQuantity { quantity: i64, reason: &'static str },

    #[error(transparent)]
    Remote(#[from] RemoteError),
}
