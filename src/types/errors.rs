use std::fmt;

// === ConfigError ===

/// Errors raised while loading service configuration.
///
/// All of these are fatal at startup: the process must not begin serving
/// requests with a missing or unusable configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The vault master secret is missing or empty.
    MissingMasterSecret,
    /// The auth-token signing secret is missing or empty.
    MissingAuthSecret,
    /// The bind address could not be parsed as `host:port`.
    InvalidBindAddr(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingMasterSecret => {
                write!(f, "master secret is not set (PASSVAULT_MASTER_SECRET)")
            }
            ConfigError::MissingAuthSecret => {
                write!(f, "auth secret is not set (PASSVAULT_AUTH_SECRET)")
            }
            ConfigError::InvalidBindAddr(addr) => write!(f, "invalid bind address: {}", addr),
        }
    }
}

impl std::error::Error for ConfigError {}

// === CipherError ===

/// Errors related to field encryption and envelope handling.
#[derive(Debug)]
pub enum CipherError {
    /// Failed to derive an encryption key from the master secret.
    KeyDerivation(String),
    /// Encryption operation failed.
    Encryption(String),
    /// Decryption failed: wrong key, tampered data, or corrupt ciphertext.
    Decryption(String),
    /// The stored value does not have the expected envelope shape.
    Format(String),
    /// Failed to generate random bytes.
    RandomGeneration(String),
}

impl fmt::Display for CipherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherError::KeyDerivation(msg) => write!(f, "Key derivation failed: {}", msg),
            CipherError::Encryption(msg) => write!(f, "Encryption failed: {}", msg),
            CipherError::Decryption(msg) => write!(f, "Decryption failed: {}", msg),
            CipherError::Format(msg) => write!(f, "Invalid envelope format: {}", msg),
            CipherError::RandomGeneration(msg) => {
                write!(f, "Random generation failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for CipherError {}

// === VaultError ===

/// Errors related to vault entry storage operations.
#[derive(Debug)]
pub enum VaultError {
    /// A required field was missing or empty.
    Validation(String),
    /// No entry with the given id exists within the caller's scope.
    ///
    /// Ownership mismatches collapse into this variant so callers cannot
    /// distinguish "someone else's entry" from "no entry at all".
    NotFound,
    /// Database operation failed.
    Database(String),
    /// Field encryption failed during a write.
    Cipher(CipherError),
    /// A blocking storage task failed to complete.
    TaskFailure(String),
}

impl fmt::Display for VaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VaultError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            VaultError::NotFound => write!(f, "Password entry not found"),
            VaultError::Database(msg) => write!(f, "Vault database error: {}", msg),
            VaultError::Cipher(err) => write!(f, "Vault cipher error: {}", err),
            VaultError::TaskFailure(msg) => write!(f, "Vault task failed: {}", msg),
        }
    }
}

impl std::error::Error for VaultError {}

// === BreachError ===

/// Errors from the breach corpus lookup.
///
/// Never conflated with a "safe" outcome: a failed check is unknown, not clean.
#[derive(Debug)]
pub enum BreachError {
    /// Transport-level failure reaching the range API.
    Network(String),
    /// The range API answered with a non-success status code.
    Http(u16),
    /// The range API response body could not be parsed.
    Parse(String),
}

impl fmt::Display for BreachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreachError::Network(msg) => write!(f, "Breach lookup network error: {}", msg),
            BreachError::Http(status) => {
                write!(f, "Breach lookup failed with HTTP status {}", status)
            }
            BreachError::Parse(msg) => write!(f, "Breach lookup parse error: {}", msg),
        }
    }
}

impl std::error::Error for BreachError {}

// === AuthError ===

/// Errors from bearer-credential validation.
///
/// Display strings stay generic: auth failures must not describe which part
/// of the credential was wrong.
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    /// The token is not in the expected `payload.signature` shape.
    Malformed,
    /// The token signature does not verify.
    InvalidSignature,
    /// The token verified but its expiry has passed.
    Expired,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Malformed | AuthError::InvalidSignature => {
                write!(f, "Invalid credentials")
            }
            AuthError::Expired => write!(f, "Credentials expired"),
        }
    }
}

impl std::error::Error for AuthError {}
