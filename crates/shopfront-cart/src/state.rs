//! Read-only view of the cart published to subscribers.

use std::sync::Arc;

use rust_decimal::Decimal;
use shopfront_core::{CartIdentity, CartLine, CartSnapshot};

/// One committed state of the cart core.
///
/// Every accessor is a pure function of the committed snapshot and the
/// loading/error flags; consumers cannot set any of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    pub(crate) initialized: bool,
    pub(crate) pending: bool,
    pub(crate) snapshot: Option<Arc<CartSnapshot>>,
    pub(crate) error: Option<String>,
}

impl CartState {
    /// True until the startup protocol has finished, and while an operation
    /// is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        !self.initialized || self.pending
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Message of the most recent failure; cleared by the next success.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<&CartSnapshot> {
        self.snapshot.as_deref()
    }

    #[must_use]
    pub fn identity(&self) -> Option<&CartIdentity> {
        self.snapshot.as_ref().map(|s| &s.id)
    }

    #[must_use]
    pub fn items(&self) -> &[CartLine] {
        self.snapshot.as_ref().map_or(&[], |s| s.lines.as_slice())
    }

    /// Sum of line quantities; 0 with no cart.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.snapshot.as_ref().map_or(0, |s| s.total_quantity())
    }

    /// Total cost amount of the cart; 0 with no cart.
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        self.snapshot
            .as_ref()
            .map_or(Decimal::ZERO, |s| s.cost.total.amount)
    }

    #[must_use]
    pub fn currency_code(&self) -> Option<&str> {
        self.snapshot
            .as_ref()
            .map(|s| s.cost.total.currency_code.as_str())
    }

    #[must_use]
    pub fn checkout_url(&self) -> Option<&str> {
        self.snapshot
            .as_ref()
            .map(|s| s.checkout_url.as_str())
            .filter(|url| !url.is_empty())
    }

    /// True when there is no cart or the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}
