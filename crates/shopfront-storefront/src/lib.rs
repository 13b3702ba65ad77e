//! Storefront GraphQL gateway.
//!
//! [`StorefrontClient`] speaks the hosted commerce Storefront API: cart
//! mutations for the cart core (through [`shopfront_core::CartGateway`]) and
//! catalog queries for product browsing.

pub mod checkout;
pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

mod gateway;
mod queries;

pub use checkout::checkout_redirect;
pub use client::StorefrontClient;
pub use error::StorefrontError;
