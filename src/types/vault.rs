use serde::{Deserialize, Serialize};

/// A stored vault entry as it exists at rest.
///
/// `secret` holds the encrypted envelope, never plaintext (except transiently
/// during the one-time legacy migration). Decryption happens at the API
/// boundary when the entry is serialized to its owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultEntry {
    pub id: String,
    pub owner_id: String,
    pub label: String,
    pub account: String,
    pub secret: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Caller-supplied fields for creating or updating a vault entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultEntryInput {
    pub label: String,
    pub account: String,
    pub secret: String,
}

/// A vault entry as serialized to its owner: `secret` is decrypted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultEntryResponse {
    pub id: String,
    pub owner_id: String,
    pub label: String,
    pub account: String,
    pub secret: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Outcome counts from the one-time plaintext-encryption migration.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MigrationSummary {
    /// Rows examined.
    pub total: usize,
    /// Rows that held plaintext and were encrypted by this run.
    pub encrypted: usize,
    /// Rows already in envelope form, left untouched.
    pub already_encrypted: usize,
    /// Rows whose encryption failed; left untouched for a later retry.
    pub failed: usize,
}
