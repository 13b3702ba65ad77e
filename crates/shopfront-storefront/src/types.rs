//! Storefront API response types, exactly as they arrive on the wire.
//!
//! ### Money
//! `amount` is a decimal **string** (`"29.00"`), never a JSON number. It is
//! parsed into `Decimal` during normalization, not here, so a malformed
//! amount surfaces as a normalization error naming the field.
//!
//! ### `totalTaxAmount`
//! Nullable; `null` until checkout has estimated tax.
//!
//! ### Cart `merchandise`
//! A union. Only `ProductVariant` is selected by our fragment; any other
//! member arrives as `{}` and fails deserialization of the line.
//!
//! ### Nullable mutation payloads
//! `cart` in a mutation payload is `null` whenever `userErrors` is
//! non-empty, and also when the cart id no longer resolves.

use serde::Deserialize;

/// Top-level GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMoney {
    pub amount: String,
    pub currency_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawImage {
    pub url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawSelectedOption {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct Nodes<T> {
    pub nodes: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    pub page_info: PageInfo,
    pub nodes: Vec<T>,
}

// ---------------------------------------------------------------------------
// Cart
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCart {
    pub id: String,
    pub checkout_url: String,
    /// ISO 8601 timestamp, e.g. `"2024-05-01T12:00:00Z"`.
    #[serde(default)]
    pub updated_at: Option<String>,
    pub cost: RawCartCost,
    pub lines: Nodes<RawCartLine>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCartCost {
    pub subtotal_amount: RawMoney,
    pub total_amount: RawMoney,
    #[serde(default)]
    pub total_tax_amount: Option<RawMoney>,
}

#[derive(Debug, Deserialize)]
pub struct RawCartLine {
    pub id: String,
    /// Signed on the wire; a non-positive value never becomes a core line.
    pub quantity: i64,
    pub cost: RawLineCost,
    pub merchandise: RawMerchandise,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLineCost {
    pub total_amount: RawMoney,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMerchandise {
    pub id: String,
    pub title: String,
    /// Defaults to `true` when absent (optimistic assumption).
    #[serde(default = "default_available")]
    pub available_for_sale: bool,
    pub price: RawMoney,
    #[serde(default)]
    pub selected_options: Vec<RawSelectedOption>,
    pub product: RawProductRef,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProductRef {
    pub title: String,
    pub handle: String,
    #[serde(default)]
    pub featured_image: Option<RawImage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCartUserError {
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
}

/// Payload shared by `cartCreate`, `cartLinesAdd`, `cartLinesUpdate`, and
/// `cartLinesRemove`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMutationPayload {
    #[serde(default)]
    pub cart: Option<RawCart>,
    #[serde(default)]
    pub user_errors: Vec<RawCartUserError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCreateData {
    pub cart_create: Option<CartMutationPayload>,
}

#[derive(Debug, Deserialize)]
pub struct CartQueryData {
    pub cart: Option<RawCart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLinesAddData {
    pub cart_lines_add: Option<CartMutationPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLinesUpdateData {
    pub cart_lines_update: Option<CartMutationPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLinesRemoveData {
    pub cart_lines_remove: Option<CartMutationPayload>,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub id: String,
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// May be an empty string; normalized to `None`.
    #[serde(default)]
    pub vendor: Option<String>,
    /// May be an empty string; normalized to `None`.
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_available")]
    pub available_for_sale: bool,
    pub price_range: RawPriceRange,
    #[serde(default)]
    pub featured_image: Option<RawImage>,
    #[serde(default = "empty_nodes")]
    pub images: Nodes<RawImage>,
    #[serde(default)]
    pub options: Vec<RawProductOption>,
    pub variants: Nodes<RawVariant>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPriceRange {
    pub min_variant_price: RawMoney,
    pub max_variant_price: RawMoney,
}

#[derive(Debug, Deserialize)]
pub struct RawProductOption {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVariant {
    pub id: String,
    pub title: String,
    /// Present but may be an empty string on some stores.
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default = "default_available")]
    pub available_for_sale: bool,
    pub price: RawMoney,
    /// `null` when the variant is not on sale.
    #[serde(default)]
    pub compare_at_price: Option<RawMoney>,
    #[serde(default)]
    pub selected_options: Vec<RawSelectedOption>,
    #[serde(default)]
    pub image: Option<RawImage>,
}

#[derive(Debug, Deserialize)]
pub struct RawCollection {
    pub id: String,
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<RawImage>,
}

#[derive(Debug, Deserialize)]
pub struct RawCollectionWithProducts {
    pub id: String,
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<RawImage>,
    pub products: Connection<RawProduct>,
}

#[derive(Debug, Deserialize)]
pub struct ProductsData {
    pub products: Connection<RawProduct>,
}

#[derive(Debug, Deserialize)]
pub struct ProductData {
    pub product: Option<RawProduct>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionsData {
    pub collections: Connection<RawCollection>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionData {
    pub collection: Option<RawCollectionWithProducts>,
}

fn default_available() -> bool {
    true
}

fn empty_nodes<T>() -> Nodes<T> {
    Nodes { nodes: Vec::new() }
}
