use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Bare store host, e.g. `"example.myshopify.com"`.
    pub store_domain: String,
    pub storefront_token: String,
    /// Storefront API version path segment, e.g. `"2024-10"`.
    pub api_version: String,
    pub cart_state_path: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub page_size: u32,
}

impl AppConfig {
    /// Full GraphQL endpoint URL for the configured store and API version.
    #[must_use]
    pub fn storefront_endpoint(&self) -> String {
        format!(
            "https://{}/api/{}/graphql.json",
            self.store_domain, self.api_version
        )
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("store_domain", &self.store_domain)
            .field("storefront_token", &"[redacted]")
            .field("api_version", &self.api_version)
            .field("cart_state_path", &self.cart_state_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("page_size", &self.page_size)
            .finish()
    }
}
