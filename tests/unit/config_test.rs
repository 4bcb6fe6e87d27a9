//! Unit tests for configuration loading.
//!
//! `Config::from_lookup` is driven with closures so the tests never touch
//! process-global environment state.

use std::collections::HashMap;

use passvault::config::{
    Config, DEFAULT_BIND_ADDR, DEFAULT_BREACH_API_URL, DEFAULT_DB_PATH, ENV_AUTH_SECRET,
    ENV_BIND_ADDR, ENV_BREACH_API_URL, ENV_DB_PATH, ENV_MASTER_SECRET,
};
use passvault::types::errors::ConfigError;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn test_missing_master_secret_is_fatal() {
    let result = Config::from_lookup(lookup_from(&[]));
    assert!(matches!(result, Err(ConfigError::MissingMasterSecret)));
}

#[test]
fn test_blank_master_secret_is_fatal() {
    let result = Config::from_lookup(lookup_from(&[(ENV_MASTER_SECRET, "   ")]));
    assert!(matches!(result, Err(ConfigError::MissingMasterSecret)));
}

#[test]
fn test_defaults_applied_when_only_master_secret_set() {
    let config = Config::from_lookup(lookup_from(&[(ENV_MASTER_SECRET, "s3cret")])).unwrap();
    assert_eq!(config.master_secret, "s3cret");
    assert_eq!(config.database_path.to_str().unwrap(), DEFAULT_DB_PATH);
    assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    assert_eq!(config.breach_api_url, DEFAULT_BREACH_API_URL);
    assert!(config.auth_secret.is_none());
}

#[test]
fn test_explicit_values_override_defaults() {
    let config = Config::from_lookup(lookup_from(&[
        (ENV_MASTER_SECRET, "s3cret"),
        (ENV_AUTH_SECRET, "signing"),
        (ENV_DB_PATH, "/var/lib/passvault/vault.db"),
        (ENV_BIND_ADDR, "0.0.0.0:8443"),
        (ENV_BREACH_API_URL, "http://localhost:9999/range"),
    ]))
    .unwrap();

    assert_eq!(config.auth_secret.as_deref(), Some("signing"));
    assert_eq!(
        config.database_path.to_str().unwrap(),
        "/var/lib/passvault/vault.db"
    );
    assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8443");
    assert_eq!(config.breach_api_url, "http://localhost:9999/range");
}

#[test]
fn test_breach_url_trailing_slash_is_stripped() {
    let config = Config::from_lookup(lookup_from(&[
        (ENV_MASTER_SECRET, "s3cret"),
        (ENV_BREACH_API_URL, "http://localhost:9999/range/"),
    ]))
    .unwrap();
    assert_eq!(config.breach_api_url, "http://localhost:9999/range");
}

#[test]
fn test_invalid_bind_addr_is_rejected() {
    let result = Config::from_lookup(lookup_from(&[
        (ENV_MASTER_SECRET, "s3cret"),
        (ENV_BIND_ADDR, "not-an-address"),
    ]));
    assert!(matches!(result, Err(ConfigError::InvalidBindAddr(_))));
}

#[test]
fn test_require_auth_secret() {
    let without = Config::from_lookup(lookup_from(&[(ENV_MASTER_SECRET, "s3cret")])).unwrap();
    assert!(matches!(
        without.require_auth_secret(),
        Err(ConfigError::MissingAuthSecret)
    ));

    let with = Config::from_lookup(lookup_from(&[
        (ENV_MASTER_SECRET, "s3cret"),
        (ENV_AUTH_SECRET, "signing"),
    ]))
    .unwrap();
    assert_eq!(with.require_auth_secret().unwrap(), "signing");
}
