//! Shared domain types and configuration for the shopfront workspace.
//!
//! Holds the cart and catalog models every other crate speaks, the
//! [`CartGateway`] port the cart core drives, and environment-backed
//! application configuration.

pub mod app_config;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod gateway;
pub mod money;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use cart::{
    CartCost, CartIdentity, CartLine, CartLineInput, CartLineUpdate, CartSnapshot, CartVariant,
    ProductSummary, SelectedOption,
};
pub use catalog::{Collection, CollectionDetail, Image, Page, Product, ProductOption, ProductVariant};
pub use config::{load_app_config, load_app_config_from_env};
pub use gateway::{CartGateway, RemoteError, UserError};
pub use money::Money;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
