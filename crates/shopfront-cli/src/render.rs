//! Plain-text rendering of catalog and cart data.

use std::fmt::Write as _;

use shopfront_cart::CartState;
use shopfront_core::{Collection, Product};

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_owned()
    }
}

pub(crate) fn price_label(product: &Product) -> String {
    if product.has_price_range() {
        format!("{} - {}", product.min_price, product.max_price)
    } else {
        product.min_price.to_string()
    }
}

pub(crate) fn product_table(products: &[Product]) -> String {
    let mut out = format!("{:<32}{:<26}{:<10}TITLE\n", "HANDLE", "PRICE", "STOCK");
    for product in products {
        let stock = if product.available_for_sale {
            "yes"
        } else {
            "sold out"
        };
        let _ = writeln!(
            out,
            "{:<32}{:<26}{:<10}{}",
            truncate(&product.handle, 30),
            price_label(product),
            stock,
            truncate(&product.title, 50)
        );
    }
    out
}

pub(crate) fn collection_table(collections: &[Collection]) -> String {
    let mut out = format!("{:<32}TITLE\n", "HANDLE");
    for collection in collections {
        let _ = writeln!(
            out,
            "{:<32}{}",
            truncate(&collection.handle, 30),
            collection.title
        );
    }
    out
}

pub(crate) fn product_detail(product: &Product) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", product.title);
    if let Some(vendor) = &product.vendor {
        let _ = writeln!(out, "by {vendor}");
    }
    let _ = writeln!(out, "Price: {}", price_label(product));
    if !product.description.is_empty() {
        let _ = writeln!(out, "\n{}", truncate(&product.description, 400));
    }

    let options: Vec<&shopfront_core::ProductOption> = product
        .options
        .iter()
        .filter(|o| !(o.values.len() == 1 && o.values[0] == "Default Title"))
        .collect();
    if !options.is_empty() {
        out.push('\n');
        for option in options {
            let _ = writeln!(out, "{}: {}", option.name, option.values.join(", "));
        }
    }

    let _ = writeln!(out, "\nVARIANTS");
    for variant in &product.variants {
        let mut price = variant.price.to_string();
        if variant.is_on_sale() {
            if let Some(compare_at) = &variant.compare_at_price {
                let _ = write!(price, " (was {})", compare_at.amount);
            }
        }
        let stock = if variant.available_for_sale {
            ""
        } else {
            " [sold out]"
        };
        let _ = writeln!(out, "  {}  {}  {}{}", variant.id, variant.title, price, stock);
    }
    out
}

pub(crate) fn cart_summary(state: &CartState) -> String {
    let mut out = String::new();
    if state.is_empty() {
        out.push_str("cart is empty\n");
        return out;
    }

    let _ = writeln!(out, "{:<40}{:>5}  {:<14}ITEM", "LINE", "QTY", "TOTAL");
    for line in state.items() {
        let mut item = line.variant.product.title.clone();
        if line.variant.title != "Default Title" {
            let _ = write!(item, " ({})", line.variant.title);
        }
        let _ = writeln!(
            out,
            "{:<40}{:>5}  {:<14}{}",
            line.id,
            line.quantity,
            line.line_total.to_string(),
            item
        );
    }
    let _ = writeln!(
        out,
        "\n{} items, total {} {}",
        state.item_count(),
        state.total_amount(),
        state.currency_code().unwrap_or_default()
    );
    out
}
