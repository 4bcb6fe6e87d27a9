//! Vault entry storage with transparent at-rest encryption.
//!
//! Every write passes the secret through the envelope gate: plaintext is
//! encrypted, an already-sealed envelope passes through unchanged, so
//! re-saving a fetched entry can never double-encrypt. Reads return the
//! stored envelope untouched; decryption is the API boundary's job.
//!
//! All queries are scoped by `owner_id`; an entry belonging to someone else
//! is indistinguishable from a missing one.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::params;
use uuid::Uuid;

use crate::database::Database;
use crate::services::field_cipher::FieldCipher;
use crate::types::errors::VaultError;
use crate::types::vault::{MigrationSummary, VaultEntry, VaultEntryInput};

/// Vault entry store backed by SQLite + FieldCipher.
///
/// Storage work (including the deliberately slow key derivation) runs on
/// blocking threads so the async API handlers never stall the executor.
pub struct VaultStore {
    db: Arc<Database>,
    cipher: Arc<FieldCipher>,
}

impl VaultStore {
    pub fn new(db: Arc<Database>, cipher: Arc<FieldCipher>) -> Self {
        Self { db, cipher }
    }

    /// Creates an entry owned by `owner_id`.
    ///
    /// The secret is encrypted before the row is committed.
    pub async fn create(
        &self,
        owner_id: &str,
        input: VaultEntryInput,
    ) -> Result<VaultEntry, VaultError> {
        let (label, account, secret) = validate(&input)?;
        let db = self.db.clone();
        let cipher = self.cipher.clone();
        let owner_id = owner_id.to_string();

        tokio::task::spawn_blocking(move || -> Result<VaultEntry, VaultError> {
            let sealed = seal_secret(&cipher, &secret)?;
            let now = now_ts();
            let entry = VaultEntry {
                id: Uuid::new_v4().to_string(),
                owner_id,
                label,
                account,
                secret: sealed,
                created_at: now,
                updated_at: now,
            };

            db.connection()
                .execute(
                    "INSERT INTO vault_entries (id, owner_id, label, account, secret, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        entry.id,
                        entry.owner_id,
                        entry.label,
                        entry.account,
                        entry.secret,
                        entry.created_at,
                        entry.updated_at
                    ],
                )
                .map_err(|e| VaultError::Database(e.to_string()))?;

            Ok(entry)
        })
        .await
        .map_err(|e| VaultError::TaskFailure(e.to_string()))?
    }

    /// Lists the owner's entries, newest first.
    ///
    /// Secrets come back in envelope form.
    pub async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<VaultEntry>, VaultError> {
        let db = self.db.clone();
        let owner_id = owner_id.to_string();

        tokio::task::spawn_blocking(move || -> Result<Vec<VaultEntry>, VaultError> {
            let conn = db.connection();
            let mut stmt = conn
                .prepare(
                    "SELECT id, owner_id, label, account, secret, created_at, updated_at
                     FROM vault_entries
                     WHERE owner_id = ?1
                     ORDER BY created_at DESC, rowid DESC",
                )
                .map_err(|e| VaultError::Database(e.to_string()))?;

            let entries = stmt
                .query_map(params![owner_id], entry_from_row)
                .map_err(|e| VaultError::Database(e.to_string()))?;

            let mut result = Vec::new();
            for entry in entries {
                result.push(entry.map_err(|e| VaultError::Database(e.to_string()))?);
            }
            Ok(result)
        })
        .await
        .map_err(|e| VaultError::TaskFailure(e.to_string()))?
    }

    /// Updates an entry within the owner's scope, refreshing `updated_at`.
    ///
    /// The replacement secret passes through the same envelope gate as a
    /// create. Returns [`VaultError::NotFound`] when the id does not exist
    /// or belongs to another owner.
    pub async fn update(
        &self,
        owner_id: &str,
        id: &str,
        input: VaultEntryInput,
    ) -> Result<VaultEntry, VaultError> {
        let (label, account, secret) = validate(&input)?;
        let db = self.db.clone();
        let cipher = self.cipher.clone();
        let owner_id = owner_id.to_string();
        let id = id.to_string();

        tokio::task::spawn_blocking(move || -> Result<VaultEntry, VaultError> {
            let sealed = seal_secret(&cipher, &secret)?;
            let now = now_ts();
            let conn = db.connection();

            let affected = conn
                .execute(
                    "UPDATE vault_entries
                     SET label = ?1, account = ?2, secret = ?3, updated_at = ?4
                     WHERE id = ?5 AND owner_id = ?6",
                    params![label, account, sealed, now, id, owner_id],
                )
                .map_err(|e| VaultError::Database(e.to_string()))?;

            if affected == 0 {
                return Err(VaultError::NotFound);
            }

            conn.query_row(
                "SELECT id, owner_id, label, account, secret, created_at, updated_at
                 FROM vault_entries WHERE id = ?1",
                params![id],
                entry_from_row,
            )
            .map_err(|e| VaultError::Database(e.to_string()))
        })
        .await
        .map_err(|e| VaultError::TaskFailure(e.to_string()))?
    }

    /// Deletes an entry within the owner's scope.
    ///
    /// Returns [`VaultError::NotFound`] when the id does not exist or
    /// belongs to another owner.
    pub async fn delete(&self, owner_id: &str, id: &str) -> Result<(), VaultError> {
        let db = self.db.clone();
        let owner_id = owner_id.to_string();
        let id = id.to_string();

        tokio::task::spawn_blocking(move || -> Result<(), VaultError> {
            let affected = db
                .connection()
                .execute(
                    "DELETE FROM vault_entries WHERE id = ?1 AND owner_id = ?2",
                    params![id, owner_id],
                )
                .map_err(|e| VaultError::Database(e.to_string()))?;

            if affected == 0 {
                return Err(VaultError::NotFound);
            }
            Ok(())
        })
        .await
        .map_err(|e| VaultError::TaskFailure(e.to_string()))?
    }

    /// One-time migration: encrypts every stored secret that is still
    /// plaintext. Rows already in envelope form are skipped, so the pass is
    /// idempotent; rows that fail to encrypt are counted and left for a
    /// retry rather than aborting the run.
    pub async fn encrypt_plaintext_secrets(&self) -> Result<MigrationSummary, VaultError> {
        let db = self.db.clone();
        let cipher = self.cipher.clone();

        tokio::task::spawn_blocking(move || -> Result<MigrationSummary, VaultError> {
            let conn = db.connection();
            let mut stmt = conn
                .prepare("SELECT id, secret FROM vault_entries")
                .map_err(|e| VaultError::Database(e.to_string()))?;
            let rows = stmt
                .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
                .map_err(|e| VaultError::Database(e.to_string()))?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| VaultError::Database(e.to_string()))?;
            drop(stmt);

            let mut summary = MigrationSummary {
                total: rows.len(),
                ..Default::default()
            };

            for (id, secret) in rows {
                if FieldCipher::is_envelope(&secret) {
                    summary.already_encrypted += 1;
                    continue;
                }
                match cipher.encrypt(&secret) {
                    Ok(sealed) => {
                        conn.execute(
                            "UPDATE vault_entries SET secret = ?1, updated_at = ?2 WHERE id = ?3",
                            params![sealed, now_ts(), id],
                        )
                        .map_err(|e| VaultError::Database(e.to_string()))?;
                        tracing::info!(entry_id = %id, "encrypted legacy plaintext secret");
                        summary.encrypted += 1;
                    }
                    Err(e) => {
                        tracing::error!(entry_id = %id, error = %e, "failed to encrypt legacy secret");
                        summary.failed += 1;
                    }
                }
            }

            Ok(summary)
        })
        .await
        .map_err(|e| VaultError::TaskFailure(e.to_string()))?
    }
}

/// The write gate: plaintext is sealed, an existing envelope passes through.
fn seal_secret(cipher: &FieldCipher, secret: &str) -> Result<String, VaultError> {
    if FieldCipher::is_envelope(secret) {
        Ok(secret.to_string())
    } else {
        cipher.encrypt(secret).map_err(VaultError::Cipher)
    }
}

fn validate(input: &VaultEntryInput) -> Result<(String, String, String), VaultError> {
    let label = input.label.trim();
    if label.is_empty() {
        return Err(VaultError::Validation("label is required".to_string()));
    }
    let account = input.account.trim();
    if account.is_empty() {
        return Err(VaultError::Validation("account is required".to_string()));
    }
    // The secret is not trimmed: leading/trailing whitespace in a password
    // is significant.
    if input.secret.is_empty() {
        return Err(VaultError::Validation("secret is required".to_string()));
    }
    Ok((
        label.to_string(),
        account.to_string(),
        input.secret.clone(),
    ))
}

fn entry_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<VaultEntry> {
    Ok(VaultEntry {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        label: row.get(2)?,
        account: row.get(3)?,
        secret: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

fn now_ts() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
