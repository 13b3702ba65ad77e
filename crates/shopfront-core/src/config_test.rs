use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("SHOPFRONT_STORE_DOMAIN", "example.myshopify.com");
    m.insert("SHOPFRONT_STOREFRONT_TOKEN", "test-token");
    m
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "SHOPFRONT_ENV"));
}

#[test]
fn build_app_config_fails_without_store_domain() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SHOPFRONT_STORE_DOMAIN"),
        "expected MissingEnvVar(SHOPFRONT_STORE_DOMAIN), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_without_token() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("SHOPFRONT_STORE_DOMAIN", "example.myshopify.com");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SHOPFRONT_STOREFRONT_TOKEN"),
        "expected MissingEnvVar(SHOPFRONT_STOREFRONT_TOKEN), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_token_as_missing() {
    let mut map = full_env();
    map.insert("SHOPFRONT_STOREFRONT_TOKEN", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.store_domain, "example.myshopify.com");
    assert_eq!(cfg.storefront_token, "test-token");
    assert_eq!(cfg.api_version, "2024-10");
    assert_eq!(cfg.cart_state_path, PathBuf::from("./.shopfront/cart.json"));
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "shopfront/0.1 (storefront-client)");
    assert_eq!(cfg.page_size, 24);
}

#[test]
fn storefront_endpoint_uses_domain_and_version() {
    let mut map = full_env();
    map.insert("SHOPFRONT_API_VERSION", "2025-01");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.storefront_endpoint(),
        "https://example.myshopify.com/api/2025-01/graphql.json"
    );
}

#[test]
fn store_domain_strips_scheme_and_path() {
    let mut map = full_env();
    map.insert(
        "SHOPFRONT_STORE_DOMAIN",
        "https://Example.myshopify.com/collections/all",
    );
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.store_domain, "example.myshopify.com");
}

#[test]
fn store_domain_rejects_scheme_only() {
    let mut map = full_env();
    map.insert("SHOPFRONT_STORE_DOMAIN", "https://");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHOPFRONT_STORE_DOMAIN"),
        "expected InvalidEnvVar(SHOPFRONT_STORE_DOMAIN), got: {result:?}"
    );
}

#[test]
fn request_timeout_override() {
    let mut map = full_env();
    map.insert("SHOPFRONT_REQUEST_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[test]
fn request_timeout_invalid() {
    let mut map = full_env();
    map.insert("SHOPFRONT_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHOPFRONT_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(SHOPFRONT_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn page_size_zero_is_rejected() {
    let mut map = full_env();
    map.insert("SHOPFRONT_PAGE_SIZE", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHOPFRONT_PAGE_SIZE"),
        "expected InvalidEnvVar(SHOPFRONT_PAGE_SIZE), got: {result:?}"
    );
}

#[test]
fn page_size_above_api_cap_is_rejected() {
    let mut map = full_env();
    map.insert("SHOPFRONT_PAGE_SIZE", "251");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn page_size_at_api_cap_is_accepted() {
    let mut map = full_env();
    map.insert("SHOPFRONT_PAGE_SIZE", "250");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.page_size, 250);
}

#[test]
fn debug_output_redacts_token() {
    let cfg = build_app_config(lookup_from_map(&full_env())).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("test-token"), "token leaked: {debug}");
    assert!(debug.contains("[redacted]"));
}
