//! Checkout handoff.
//!
//! Checkout itself happens on the remote service; the storefront only hands
//! the shopper the cart's checkout URL.

use reqwest::Url;

use crate::error::StorefrontError;

/// Validates a cart checkout URL before handing the shopper off to it.
///
/// # Errors
///
/// Returns [`StorefrontError::InvalidCheckoutUrl`] if `url` is not an
/// absolute http(s) URL with a host.
pub fn checkout_redirect(url: &str) -> Result<Url, StorefrontError> {
    let invalid = |reason: String| StorefrontError::InvalidCheckoutUrl {
        url: url.to_owned(),
        reason,
    };

    let parsed = Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme \"{}\"", parsed.scheme())));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host".to_owned()));
    }

    tracing::debug!(checkout_url = %parsed, "checkout handoff");
    Ok(parsed)
}
