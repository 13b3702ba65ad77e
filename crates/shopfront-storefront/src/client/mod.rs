//! HTTP client for the Storefront GraphQL API.

mod cart;
mod catalog;

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shopfront_core::AppConfig;

use crate::error::StorefrontError;
use crate::types::GraphQlResponse;

/// Maximum number of pages to fetch before returning an error.
/// Prevents infinite loops on cycling cursors.
pub(super) const MAX_PAGES: usize = 200;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

/// Client for the Storefront GraphQL API.
///
/// Every call is a single JSON `POST` to one endpoint. Rate limiting (429),
/// rejected tokens (401/403), not-found (404), and other non-2xx responses
/// surface as typed errors, as do GraphQL-level `errors` arrays.
///
/// The client never retries: retry policy belongs to its callers.
pub struct StorefrontClient {
    client: Client,
    endpoint: Url,
    access_token: String,
}

#[derive(Serialize)]
struct GraphQlRequest<'a, V: Serialize> {
    query: &'a str,
    variables: V,
}

impl StorefrontClient {
    /// Creates a client for the store and API version in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`StorefrontError::InvalidEndpoint`] if the
    /// configured domain does not form a valid URL.
    pub fn from_config(config: &AppConfig) -> Result<Self, StorefrontError> {
        Self::with_endpoint(
            &config.storefront_endpoint(),
            &config.storefront_token,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client pointed at an explicit GraphQL endpoint (for testing
    /// with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`StorefrontError::InvalidEndpoint`] if
    /// `endpoint` is not an absolute http(s) URL.
    pub fn with_endpoint(
        endpoint: &str,
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, StorefrontError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let parsed = Url::parse(endpoint).map_err(|e| StorefrontError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(StorefrontError::InvalidEndpoint {
                endpoint: endpoint.to_owned(),
                reason: format!("unsupported scheme \"{}\"", parsed.scheme()),
            });
        }

        Ok(Self {
            client,
            endpoint: parsed,
            access_token: access_token.to_owned(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends one GraphQL operation and returns its `data` payload.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::RateLimited`] on HTTP 429.
    /// - [`StorefrontError::Unauthorized`] on HTTP 401 or 403.
    /// - [`StorefrontError::NotFound`] on HTTP 404.
    /// - [`StorefrontError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`StorefrontError::Http`] on network or TLS failure.
    /// - [`StorefrontError::Deserialize`] if the body is not the expected JSON.
    /// - [`StorefrontError::GraphQl`] on a non-empty `errors` array or missing `data`.
    pub(crate) async fn execute<V, T>(
        &self,
        operation: &str,
        query: &str,
        variables: V,
    ) -> Result<T, StorefrontError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        tracing::debug!(operation, endpoint = %self.endpoint, "storefront request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(StorefrontError::RateLimited { retry_after_secs });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(StorefrontError::Unauthorized {
                status: status.as_u16(),
            });
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StorefrontError::NotFound {
                url: self.endpoint.to_string(),
            });
        }

        if !status.is_success() {
            return Err(StorefrontError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        let body = response.text().await?;
        let envelope: GraphQlResponse<T> =
            serde_json::from_str(&body).map_err(|e| StorefrontError::Deserialize {
                context: format!("{operation} response"),
                source: e,
            })?;

        Self::unwrap_envelope(operation, envelope)
    }

    /// Fails on GraphQL-level errors and returns `data` otherwise.
    fn unwrap_envelope<T>(
        operation: &str,
        envelope: GraphQlResponse<T>,
    ) -> Result<T, StorefrontError> {
        if !envelope.errors.is_empty() {
            let message = envelope
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(StorefrontError::GraphQl {
                operation: operation.to_owned(),
                message,
            });
        }

        envelope.data.ok_or_else(|| StorefrontError::GraphQl {
            operation: operation.to_owned(),
            message: "response carried no data".to_owned(),
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
