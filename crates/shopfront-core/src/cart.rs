//! Cart domain model.
//!
//! A [`CartSnapshot`] is the last-known state of a remote cart. Snapshots are
//! never edited in place: every successful remote call produces a new one that
//! replaces its predecessor wholesale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Opaque token identifying a remote cart resource
/// (e.g., `"gid://shopify/Cart/c1-abc123"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartIdentity(String);

impl CartIdentity {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CartIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Authoritative copy of a remote cart at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub id: CartIdentity,
    /// Lines in the order the remote service returned them. Every line has
    /// `quantity >= 1`.
    pub lines: Vec<CartLine>,
    pub cost: CartCost,
    /// Remote-provided URL that hands the shopper off to checkout.
    pub checkout_url: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CartSnapshot {
    /// Sum of line quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    #[must_use]
    pub fn line(&self, line_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == line_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Aggregate cost breakdown of a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartCost {
    pub subtotal: Money,
    /// Absent when the remote service has not estimated tax yet.
    #[serde(default)]
    pub tax: Option<Money>,
    pub total: Money,
}

/// One line item. The line id is distinct from the variant id: quantity
/// updates and removals target the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: String,
    pub quantity: u32,
    /// Cost of the whole line (unit price times quantity, after discounts).
    pub line_total: Money,
    pub variant: CartVariant,
}

/// The purchasable variant a [`CartLine`] refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartVariant {
    pub id: String,
    /// Display title, e.g. `"Large / Blue"` or `"Default Title"`.
    pub title: String,
    pub unit_price: Money,
    pub selected_options: Vec<SelectedOption>,
    pub available_for_sale: bool,
    pub product: ProductSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

/// Minimal product details shown next to a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub title: String,
    pub handle: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_alt: Option<String>,
}

/// A line to add: which variant and how many.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineInput {
    pub merchandise_id: String,
    pub quantity: u32,
}

/// A new quantity for an existing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineUpdate {
    pub line_id: String,
    pub quantity: u32,
}
