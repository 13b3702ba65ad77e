//! Catalog browsing command handlers.

use shopfront_storefront::StorefrontClient;

use crate::render;

/// List one page of products, or the whole catalog with `all`.
///
/// # Errors
///
/// Returns an error if any Storefront request fails. With `all`, a failure on
/// any page aborts the listing.
pub(crate) async fn run_products(
    client: &StorefrontClient,
    limit: u32,
    after: Option<&str>,
    all: bool,
) -> anyhow::Result<()> {
    if all {
        let products = client.fetch_all_products(limit).await?;
        if products.is_empty() {
            println!("no products found");
            return Ok(());
        }
        print!("{}", render::product_table(&products));
        println!("{} products", products.len());
        return Ok(());
    }

    let page = client.products_page(limit, after).await?;
    if page.items.is_empty() {
        println!("no products found");
        return Ok(());
    }
    print!("{}", render::product_table(&page.items));
    if let Some(cursor) = &page.next_cursor {
        println!("more: shopfront products --after {cursor}");
    }
    Ok(())
}

/// List one page of collections.
///
/// # Errors
///
/// Returns an error if the Storefront request fails.
pub(crate) async fn run_collections(client: &StorefrontClient, limit: u32) -> anyhow::Result<()> {
    let page = client.collections_page(limit, None).await?;
    if page.items.is_empty() {
        println!("no collections found");
        return Ok(());
    }
    print!("{}", render::collection_table(&page.items));
    if page.has_next() {
        println!("showing first {limit}; raise --limit to see more");
    }
    Ok(())
}

/// Show a collection with its first `limit` products.
///
/// # Errors
///
/// Returns an error if the collection does not exist or the request fails.
pub(crate) async fn run_collection(
    client: &StorefrontClient,
    handle: &str,
    limit: u32,
) -> anyhow::Result<()> {
    let detail = client
        .collection_by_handle(handle, limit)
        .await?
        .ok_or_else(|| anyhow::anyhow!("collection '{handle}' not found"))?;

    println!("{}", detail.collection.title);
    if !detail.collection.description.is_empty() {
        println!("{}", render::truncate(&detail.collection.description, 200));
    }
    println!();
    if detail.products.items.is_empty() {
        println!("no products in this collection");
    } else {
        print!("{}", render::product_table(&detail.products.items));
    }
    Ok(())
}

/// Show product detail.
///
/// # Errors
///
/// Returns an error if the product does not exist or the request fails.
pub(crate) async fn run_product(client: &StorefrontClient, handle: &str) -> anyhow::Result<()> {
    let product = client
        .product_by_handle(handle)
        .await?
        .ok_or_else(|| anyhow::anyhow!("product '{handle}' not found"))?;
    print!("{}", render::product_detail(&product));
    Ok(())
}
