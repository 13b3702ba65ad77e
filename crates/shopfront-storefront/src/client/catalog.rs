//! Catalog browsing for `StorefrontClient`: product listing, collections,
//! and product detail.

use serde_json::json;
use shopfront_core::{Collection, CollectionDetail, Page, Product};

use crate::error::StorefrontError;
use crate::normalize::{normalize_collection, normalize_image, normalize_product};
use crate::queries;
use crate::types::{CollectionData, CollectionsData, Connection, ProductData, ProductsData, RawProduct};

use super::{StorefrontClient, MAX_PAGES};

impl StorefrontClient {
    /// Fetches one page of products.
    ///
    /// # Errors
    ///
    /// Any transport, envelope, or normalization error.
    pub async fn products_page(
        &self,
        first: u32,
        after: Option<&str>,
    ) -> Result<Page<Product>, StorefrontError> {
        let variables = json!({ "first": first, "after": after });
        let data: ProductsData = self
            .execute("products", queries::PRODUCTS_QUERY, variables)
            .await?;
        product_page(data.products)
    }

    /// Fetches every product by following page cursors.
    ///
    /// **All-or-nothing**: if any page fails, products from earlier pages are
    /// discarded and the error is returned.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::products_page`].
    /// Returns [`StorefrontError::PaginationLimit`] past [`MAX_PAGES`] pages.
    pub async fn fetch_all_products(
        &self,
        page_size: u32,
    ) -> Result<Vec<Product>, StorefrontError> {
        let mut all_products: Vec<Product> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut page_count = 0usize;

        loop {
            page_count += 1;
            if page_count > MAX_PAGES {
                return Err(StorefrontError::PaginationLimit {
                    max_pages: MAX_PAGES,
                });
            }

            let page = self.products_page(page_size, cursor.as_deref()).await?;
            all_products.extend(page.items);

            cursor = page.next_cursor;
            if cursor.is_none() {
                break;
            }
        }

        tracing::debug!(
            pages = page_count,
            products = all_products.len(),
            "fetched full product listing"
        );
        Ok(all_products)
    }

    /// Fetches product detail by handle. `Ok(None)` if no product has it.
    ///
    /// # Errors
    ///
    /// Any transport, envelope, or normalization error.
    pub async fn product_by_handle(
        &self,
        handle: &str,
    ) -> Result<Option<Product>, StorefrontError> {
        let data: ProductData = self
            .execute(
                "productByHandle",
                queries::PRODUCT_BY_HANDLE,
                json!({ "handle": handle }),
            )
            .await?;
        data.product.map(normalize_product).transpose()
    }

    /// Fetches one page of collections.
    ///
    /// # Errors
    ///
    /// Any transport or envelope error.
    pub async fn collections_page(
        &self,
        first: u32,
        after: Option<&str>,
    ) -> Result<Page<Collection>, StorefrontError> {
        let variables = json!({ "first": first, "after": after });
        let data: CollectionsData = self
            .execute("collections", queries::COLLECTIONS_QUERY, variables)
            .await?;
        let next_cursor = next_cursor(&data.collections);
        Ok(Page {
            items: data
                .collections
                .nodes
                .into_iter()
                .map(normalize_collection)
                .collect(),
            next_cursor,
        })
    }

    /// Fetches a collection and its first `first` products by handle.
    ///
    /// # Errors
    ///
    /// Any transport, envelope, or normalization error.
    pub async fn collection_by_handle(
        &self,
        handle: &str,
        first: u32,
    ) -> Result<Option<CollectionDetail>, StorefrontError> {
        let data: CollectionData = self
            .execute(
                "collectionByHandle",
                queries::COLLECTION_BY_HANDLE,
                json!({ "handle": handle, "first": first }),
            )
            .await?;

        let Some(raw) = data.collection else {
            return Ok(None);
        };

        Ok(Some(CollectionDetail {
            collection: Collection {
                id: raw.id,
                handle: raw.handle,
                title: raw.title,
                description: raw.description,
                image: raw.image.map(normalize_image),
            },
            products: product_page(raw.products)?,
        }))
    }
}

fn product_page(connection: Connection<RawProduct>) -> Result<Page<Product>, StorefrontError> {
    let next_cursor = next_cursor(&connection);
    let items = connection
        .nodes
        .into_iter()
        .map(normalize_product)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Page { items, next_cursor })
}

/// Cursor for the following page, or `None` on the last page.
///
/// A page that claims more results but carries no cursor is treated as the
/// last page.
fn next_cursor<T>(connection: &Connection<T>) -> Option<String> {
    if connection.page_info.has_next_page {
        connection.page_info.end_cursor.clone()
    } else {
        None
    }
}
