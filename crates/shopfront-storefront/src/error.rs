use shopfront_core::{CartIdentity, RemoteError, UserError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by storefront API (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("storefront API rejected the access token (HTTP {status})")]
    Unauthorized { status: u16 },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("GraphQL error in {operation}: {message}")]
    GraphQl { operation: String, message: String },

    #[error("{operation} rejected: {}", join_user_errors(.errors))]
    UserErrors {
        operation: String,
        errors: Vec<UserError>,
    },

    #[error("cart {cart_id} not found")]
    CartNotFound { cart_id: CartIdentity },

    #[error("normalization error for {context}: {reason}")]
    Normalization { context: String, reason: String },

    #[error("invalid endpoint \"{endpoint}\": {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("pagination limit reached: exceeded {max_pages} pages")]
    PaginationLimit { max_pages: usize },

    #[error("invalid checkout URL \"{url}\": {reason}")]
    InvalidCheckoutUrl { url: String, reason: String },
}

fn join_user_errors(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Collapses adapter errors into the gateway taxonomy the cart core reasons
/// about.
impl From<StorefrontError> for RemoteError {
    fn from(err: StorefrontError) -> Self {
        match err {
            StorefrontError::Http(e) => RemoteError::Network(e.to_string()),
            StorefrontError::UserErrors { errors, .. } => RemoteError::Validation(errors),
            StorefrontError::CartNotFound { cart_id } => RemoteError::NotFound(cart_id),
            other => RemoteError::Service(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_become_validation() {
        let err = StorefrontError::UserErrors {
            operation: "cartLinesAdd".to_string(),
            errors: vec![UserError {
                field: vec!["lines".to_string()],
                message: "Merchandise is sold out".to_string(),
                code: Some("INVALID".to_string()),
            }],
        };
        assert_eq!(err.to_string(), "cartLinesAdd rejected: Merchandise is sold out");
        match RemoteError::from(err) {
            RemoteError::Validation(errors) => assert_eq!(errors.len(), 1),
            other => panic!("expected Validation, got: {other:?}"),
        }
    }

    #[test]
    fn missing_cart_becomes_not_found() {
        let err = StorefrontError::CartNotFound {
            cart_id: CartIdentity::new("gid://shopify/Cart/gone"),
        };
        assert!(matches!(
            RemoteError::from(err),
            RemoteError::NotFound(ref id) if id.as_str() == "gid://shopify/Cart/gone"
        ));
    }

    #[test]
    fn status_and_protocol_failures_become_service() {
        let err = StorefrontError::UnexpectedStatus {
            status: 502,
            url: "https://shop.test/api/2024-10/graphql.json".to_string(),
        };
        assert!(matches!(RemoteError::from(err), RemoteError::Service(_)));

        let err = StorefrontError::GraphQl {
            operation: "cart".to_string(),
            message: "Throttled".to_string(),
        };
        assert!(matches!(RemoteError::from(err), RemoteError::Service(_)));
    }
}
