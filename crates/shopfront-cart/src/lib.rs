//! Cart synchronization core.
//!
//! [`CartSync`] owns the shopper's cart identity and the last-known cart
//! snapshot, serializes every operation against the remote cart service, and
//! publishes a derived [`CartState`] to subscribers. The cart identity
//! survives restarts through an [`IdentityStore`].

pub mod error;
pub mod identity;
pub mod state;
pub mod sync;

#[cfg(test)]
mod test_support;

pub use error::CartError;
pub use identity::{
    FileIdentityStore, IdentityError, IdentityStore, MemoryIdentityStore, CART_IDENTITY_KEY,
};
pub use state::CartState;
pub use sync::CartSync;
