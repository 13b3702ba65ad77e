//! Catalog types for product browsing, collection listing, and product detail.

use serde::{Deserialize, Serialize};

use crate::cart::SelectedOption;
use crate::money::Money;

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Cursor for the next page; `None` on the last page.
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next_cursor.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    /// URL slug, e.g. `"classic-mug"`.
    pub handle: String,
    pub title: String,
    pub description: String,
    pub vendor: Option<String>,
    /// Empty strings from the API are normalized to `None`.
    pub product_type: Option<String>,
    pub tags: Vec<String>,
    pub available_for_sale: bool,
    pub min_price: Money,
    pub max_price: Money,
    pub featured_image: Option<Image>,
    pub images: Vec<Image>,
    pub options: Vec<ProductOption>,
    pub variants: Vec<ProductVariant>,
}

impl Product {
    /// First variant that can currently be purchased.
    #[must_use]
    pub fn first_available_variant(&self) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| v.available_for_sale)
    }

    /// `true` when the product is sold at more than one price point.
    #[must_use]
    pub fn has_price_range(&self) -> bool {
        self.min_price.amount != self.max_price.amount
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: String,
    pub title: String,
    pub sku: Option<String>,
    pub price: Money,
    /// Pre-sale comparison price, present only when the variant is on sale.
    pub compare_at_price: Option<Money>,
    pub available_for_sale: bool,
    pub selected_options: Vec<SelectedOption>,
    pub image: Option<Image>,
}

impl ProductVariant {
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.compare_at_price
            .as_ref()
            .is_some_and(|compare| compare.amount > self.price.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub description: String,
    pub image: Option<Image>,
}

/// A collection together with the first page of its products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionDetail {
    pub collection: Collection,
    pub products: Page<Product>,
}
