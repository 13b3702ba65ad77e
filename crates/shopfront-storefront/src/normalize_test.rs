use serde_json::json;

use super::*;

fn raw_cart(lines: serde_json::Value) -> RawCart {
    serde_json::from_value(json!({
        "id": "gid://shopify/Cart/c1",
        "checkoutUrl": "https://shop.test/cart/c/c1",
        "updatedAt": "2024-05-01T12:00:00Z",
        "cost": {
            "subtotalAmount": { "amount": "30.0", "currencyCode": "USD" },
            "totalAmount": { "amount": "32.40", "currencyCode": "USD" },
            "totalTaxAmount": null
        },
        "lines": { "nodes": lines }
    }))
    .expect("fixture should deserialize")
}

fn raw_line(id: &str, quantity: i64) -> serde_json::Value {
    json!({
        "id": id,
        "quantity": quantity,
        "cost": { "totalAmount": { "amount": "10.00", "currencyCode": "USD" } },
        "merchandise": {
            "id": "gid://shopify/ProductVariant/7",
            "title": "Large / Blue",
            "availableForSale": true,
            "price": { "amount": "10.00", "currencyCode": "USD" },
            "selectedOptions": [
                { "name": "Size", "value": "Large" },
                { "name": "Color", "value": "Blue" }
            ],
            "product": {
                "title": "Field Jacket",
                "handle": "field-jacket",
                "featuredImage": { "url": "https://cdn.test/jacket.png", "altText": "Jacket" }
            }
        }
    })
}

#[test]
fn normalize_cart_maps_lines_and_cost() {
    let cart = normalize_cart(raw_cart(json!([raw_line("line-1", 3)]))).unwrap();

    assert_eq!(cart.id.as_str(), "gid://shopify/Cart/c1");
    assert_eq!(cart.checkout_url, "https://shop.test/cart/c/c1");
    assert_eq!(cart.cost.total.amount, Decimal::new(3240, 2));
    assert_eq!(cart.cost.subtotal.currency_code, "USD");
    assert!(cart.cost.tax.is_none());
    assert!(cart.updated_at.is_some());

    assert_eq!(cart.lines.len(), 1);
    let line = &cart.lines[0];
    assert_eq!(line.id, "line-1");
    assert_eq!(line.quantity, 3);
    assert_eq!(line.variant.id, "gid://shopify/ProductVariant/7");
    assert_eq!(line.variant.selected_options.len(), 2);
    assert_eq!(line.variant.product.handle, "field-jacket");
    assert_eq!(
        line.variant.product.image_url.as_deref(),
        Some("https://cdn.test/jacket.png")
    );
}

#[test]
fn normalize_cart_drops_zero_quantity_lines() {
    let cart = normalize_cart(raw_cart(json!([
        raw_line("keep", 1),
        raw_line("zero", 0),
        raw_line("negative", -2)
    ])))
    .unwrap();

    let ids: Vec<&str> = cart.lines.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["keep"]);
}

#[test]
fn normalize_cart_rejects_malformed_amount() {
    let mut raw = raw_cart(json!([]));
    raw.cost.total_amount.amount = "twelve".to_string();

    let err = normalize_cart(raw).unwrap_err();
    assert!(
        matches!(err, StorefrontError::Normalization { ref context, .. } if context == "cart total"),
        "expected Normalization(cart total), got: {err:?}"
    );
}

#[test]
fn normalize_cart_ignores_bad_timestamp() {
    let mut raw = raw_cart(json!([]));
    raw.updated_at = Some("yesterday".to_string());
    let cart = normalize_cart(raw).unwrap();
    assert!(cart.updated_at.is_none());
}

#[test]
fn normalize_user_errors_defaults_missing_field_path() {
    let errors = normalize_user_errors(vec![RawCartUserError {
        field: None,
        message: "Cart is full".to_string(),
        code: None,
    }]);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].field.is_empty());
    assert_eq!(errors[0].message, "Cart is full");
}

fn raw_product() -> RawProduct {
    serde_json::from_value(json!({
        "id": "gid://shopify/Product/1",
        "handle": "field-jacket",
        "title": "Field Jacket",
        "description": "Waxed cotton.",
        "vendor": "",
        "productType": "Outerwear",
        "tags": ["winter"],
        "availableForSale": true,
        "priceRange": {
            "minVariantPrice": { "amount": "120.00", "currencyCode": "USD" },
            "maxVariantPrice": { "amount": "140.00", "currencyCode": "USD" }
        },
        "featuredImage": null,
        "images": { "nodes": [{ "url": "https://cdn.test/a.png", "altText": "" }] },
        "options": [{ "name": "Size", "values": ["M", "L"] }],
        "variants": { "nodes": [{
            "id": "gid://shopify/ProductVariant/11",
            "title": "M",
            "sku": "",
            "availableForSale": false,
            "price": { "amount": "120.00", "currencyCode": "USD" },
            "compareAtPrice": { "amount": "150.00", "currencyCode": "USD" },
            "selectedOptions": [{ "name": "Size", "value": "M" }],
            "image": null
        }] }
    }))
    .expect("fixture should deserialize")
}

#[test]
fn normalize_product_maps_variants_and_blank_strings() {
    let product = normalize_product(raw_product()).unwrap();

    assert_eq!(product.handle, "field-jacket");
    assert!(product.vendor.is_none(), "empty vendor should be None");
    assert_eq!(product.product_type.as_deref(), Some("Outerwear"));
    assert!(product.has_price_range());
    assert_eq!(product.images.len(), 1);
    assert!(product.images[0].alt_text.is_none());
    assert_eq!(product.options[0].values, vec!["M", "L"]);

    let variant = &product.variants[0];
    assert!(variant.sku.is_none(), "empty sku should be None");
    assert!(!variant.available_for_sale);
    assert!(variant.is_on_sale());
}

#[test]
fn normalize_collection_keeps_image() {
    let raw: RawCollection = serde_json::from_value(json!({
        "id": "gid://shopify/Collection/5",
        "handle": "outerwear",
        "title": "Outerwear",
        "image": { "url": "https://cdn.test/c.png", "altText": "Coats" }
    }))
    .unwrap();
    let collection = normalize_collection(raw);
    assert_eq!(collection.handle, "outerwear");
    assert_eq!(collection.description, "");
    assert_eq!(
        collection.image.and_then(|i| i.alt_text).as_deref(),
        Some("Coats")
    );
}
