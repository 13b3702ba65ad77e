//! Normalization from raw Storefront API types to [`shopfront_core`] types.
//!
//! Money amounts are parsed here; everything else is structural conversion.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shopfront_core::{
    CartCost, CartIdentity, CartLine, CartSnapshot, CartVariant, Collection, Image, Money,
    Product, ProductOption, ProductSummary, ProductVariant, SelectedOption, UserError,
};

use crate::error::StorefrontError;
use crate::queries::CART_LINES_LIMIT;
use crate::types::{
    RawCart, RawCartLine, RawCartUserError, RawCollection, RawImage, RawMoney, RawProduct,
    RawSelectedOption, RawVariant,
};

/// Normalizes a raw cart into a [`CartSnapshot`].
///
/// Lines with a non-positive quantity are dropped: a zero-quantity line must
/// never reach the cart core.
///
/// # Errors
///
/// Returns [`StorefrontError::Normalization`] if any money amount is not a
/// decimal string.
pub fn normalize_cart(raw: RawCart) -> Result<CartSnapshot, StorefrontError> {
    let cart_id = raw.id;

    if raw.lines.nodes.len() >= CART_LINES_LIMIT {
        tracing::warn!(
            cart_id = %cart_id,
            limit = CART_LINES_LIMIT,
            "cart has at least the selected line limit; later lines are not shown"
        );
    }

    let mut lines = Vec::with_capacity(raw.lines.nodes.len());
    for line in raw.lines.nodes {
        if let Some(line) = normalize_line(line, &cart_id)? {
            lines.push(line);
        }
    }

    let cost = CartCost {
        subtotal: parse_money(&raw.cost.subtotal_amount, "cart subtotal")?,
        tax: raw
            .cost
            .total_tax_amount
            .as_ref()
            .map(|m| parse_money(m, "cart tax"))
            .transpose()?,
        total: parse_money(&raw.cost.total_amount, "cart total")?,
    };

    let updated_at = raw.updated_at.as_deref().and_then(|ts| {
        DateTime::parse_from_rfc3339(ts)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                tracing::warn!(cart_id = %cart_id, updated_at = ts, error = %e, "ignoring unparsable cart timestamp");
            })
            .ok()
    });

    Ok(CartSnapshot {
        id: CartIdentity::new(cart_id),
        lines,
        cost,
        checkout_url: raw.checkout_url,
        updated_at,
    })
}

fn normalize_line(line: RawCartLine, cart_id: &str) -> Result<Option<CartLine>, StorefrontError> {
    let quantity = match u32::try_from(line.quantity) {
        Ok(q) if q > 0 => q,
        _ => {
            tracing::warn!(
                cart_id,
                line_id = %line.id,
                quantity = line.quantity,
                "dropping cart line with non-positive quantity"
            );
            return Ok(None);
        }
    };

    let merchandise = line.merchandise;
    let (image_url, image_alt) = match merchandise.product.featured_image {
        Some(image) => (Some(image.url), image.alt_text),
        None => (None, None),
    };

    Ok(Some(CartLine {
        line_total: parse_money(&line.cost.total_amount, &format!("line {}", line.id))?,
        id: line.id,
        quantity,
        variant: CartVariant {
            unit_price: parse_money(&merchandise.price, &format!("variant {}", merchandise.id))?,
            id: merchandise.id,
            title: merchandise.title,
            selected_options: normalize_options(merchandise.selected_options),
            available_for_sale: merchandise.available_for_sale,
            product: ProductSummary {
                title: merchandise.product.title,
                handle: merchandise.product.handle,
                image_url,
                image_alt,
            },
        },
    }))
}

/// Converts mutation `userErrors` into core [`UserError`]s.
#[must_use]
pub fn normalize_user_errors(raw: Vec<RawCartUserError>) -> Vec<UserError> {
    raw.into_iter()
        .map(|e| UserError {
            field: e.field.unwrap_or_default(),
            message: e.message,
            code: e.code,
        })
        .collect()
}

/// Normalizes a raw product into a [`Product`].
///
/// # Errors
///
/// Returns [`StorefrontError::Normalization`] if a price is not a decimal
/// string.
pub fn normalize_product(raw: RawProduct) -> Result<Product, StorefrontError> {
    let context = format!("product {}", raw.handle);
    let min_price = parse_money(&raw.price_range.min_variant_price, &context)?;
    let max_price = parse_money(&raw.price_range.max_variant_price, &context)?;

    let variants = raw
        .variants
        .nodes
        .into_iter()
        .map(normalize_variant)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Product {
        id: raw.id,
        handle: raw.handle,
        title: raw.title,
        description: raw.description,
        vendor: raw.vendor.filter(|s| !s.is_empty()),
        product_type: raw.product_type.filter(|s| !s.is_empty()),
        tags: raw.tags,
        available_for_sale: raw.available_for_sale,
        min_price,
        max_price,
        featured_image: raw.featured_image.map(normalize_image),
        images: raw.images.nodes.into_iter().map(normalize_image).collect(),
        options: raw
            .options
            .into_iter()
            .map(|o| ProductOption {
                name: o.name,
                values: o.values,
            })
            .collect(),
        variants,
    })
}

fn normalize_variant(raw: RawVariant) -> Result<ProductVariant, StorefrontError> {
    let context = format!("variant {}", raw.id);
    Ok(ProductVariant {
        price: parse_money(&raw.price, &context)?,
        compare_at_price: raw
            .compare_at_price
            .as_ref()
            .map(|m| parse_money(m, &context))
            .transpose()?,
        id: raw.id,
        title: raw.title,
        sku: raw.sku.filter(|s| !s.is_empty()),
        available_for_sale: raw.available_for_sale,
        selected_options: normalize_options(raw.selected_options),
        image: raw.image.map(normalize_image),
    })
}

#[must_use]
pub fn normalize_collection(raw: RawCollection) -> Collection {
    Collection {
        id: raw.id,
        handle: raw.handle,
        title: raw.title,
        description: raw.description,
        image: raw.image.map(normalize_image),
    }
}

pub(crate) fn normalize_image(raw: RawImage) -> Image {
    Image {
        url: raw.url,
        alt_text: raw.alt_text.filter(|s| !s.is_empty()),
    }
}

fn normalize_options(raw: Vec<RawSelectedOption>) -> Vec<SelectedOption> {
    raw.into_iter()
        .map(|o| SelectedOption {
            name: o.name,
            value: o.value,
        })
        .collect()
}

/// Parses a wire money value (`{"amount": "12.50", "currencyCode": "USD"}`).
///
/// # Errors
///
/// Returns [`StorefrontError::Normalization`] if `amount` is not a decimal.
pub(crate) fn parse_money(raw: &RawMoney, context: &str) -> Result<Money, StorefrontError> {
    let amount = raw
        .amount
        .trim()
        .parse::<Decimal>()
        .map_err(|e| StorefrontError::Normalization {
            context: context.to_owned(),
            reason: format!("amount \"{}\" is not a decimal: {e}", raw.amount),
        })?;
    Ok(Money::new(amount, raw.currency_code.clone()))
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
