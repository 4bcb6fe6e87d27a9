//! Service configuration.
//!
//! Everything the process needs from its environment is read once into a
//! [`Config`] at startup and passed into constructors from there; no module
//! reads environment variables at call time.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::types::errors::ConfigError;

pub const ENV_MASTER_SECRET: &str = "PASSVAULT_MASTER_SECRET";
pub const ENV_AUTH_SECRET: &str = "PASSVAULT_AUTH_SECRET";
pub const ENV_DB_PATH: &str = "PASSVAULT_DB_PATH";
pub const ENV_BIND_ADDR: &str = "PASSVAULT_BIND_ADDR";
pub const ENV_BREACH_API_URL: &str = "PASSVAULT_BREACH_API_URL";

pub const DEFAULT_DB_PATH: &str = "passvault.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_BREACH_API_URL: &str = "https://api.pwnedpasswords.com/range";

/// Runtime configuration for the passvault binaries.
#[derive(Debug, Clone)]
pub struct Config {
    /// Master secret keying the field cipher. Required everywhere the vault
    /// is touched; the process must refuse to start without it.
    pub master_secret: String,
    /// HMAC secret for the bearer-token auth gate. Required by the API
    /// server; the migration binary runs without it.
    pub auth_secret: Option<String>,
    pub database_path: PathBuf,
    pub bind_addr: SocketAddr,
    /// Base URL of the k-anonymity range API, without a trailing slash.
    pub breach_api_url: String,
}

impl Config {
    /// Loads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary lookup function.
    ///
    /// Tests use this to avoid mutating process-global environment state.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let master_secret = lookup(ENV_MASTER_SECRET)
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingMasterSecret)?;

        let auth_secret = lookup(ENV_AUTH_SECRET).filter(|s| !s.trim().is_empty());

        let database_path = lookup(ENV_DB_PATH)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let raw_addr = lookup(ENV_BIND_ADDR)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddr(raw_addr))?;

        let breach_api_url = lookup(ENV_BREACH_API_URL)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BREACH_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            master_secret,
            auth_secret,
            database_path,
            bind_addr,
            breach_api_url,
        })
    }

    /// Returns the auth secret, or the fatal configuration error the server
    /// binary surfaces when it is absent.
    pub fn require_auth_secret(&self) -> Result<&str, ConfigError> {
        self.auth_secret
            .as_deref()
            .ok_or(ConfigError::MissingAuthSecret)
    }
}
