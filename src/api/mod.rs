//! HTTP surface for the vault.
//!
//! The storage layer only ever sees envelopes; decryption happens here, at
//! the serialization boundary, so what is persisted and what is returned
//! stay visibly distinct.

pub mod auth;
pub mod handlers;

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, put};
use axum::Router;

use crate::services::field_cipher::FieldCipher;
use crate::services::vault_store::VaultStore;
use crate::types::vault::{VaultEntry, VaultEntryResponse};

use auth::AuthGate;

/// Sentinel returned in place of a secret whose stored envelope failed to
/// decrypt. One unreadable record must not fail a whole listing.
pub const DECRYPTION_FAILED_PLACEHOLDER: &str = "[decryption failed]";

/// Shared state for the API handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<VaultStore>,
    pub cipher: Arc<FieldCipher>,
    pub auth: Arc<dyn AuthGate>,
}

/// Builds the application router.
///
/// Every `/api/passwords` route sits behind the bearer-credential
/// middleware; the health probe does not.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/passwords",
            get(handlers::list_entries).post(handlers::create_entry),
        )
        .route(
            "/api/passwords/{id}",
            put(handlers::update_entry).delete(handlers::delete_entry),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ))
        .route("/api/health", get(handlers::health))
        .with_state(state)
}

/// Decrypt-on-response: maps a stored entry to its serialized form.
///
/// A stored envelope that fails format or integrity checks serializes as
/// [`DECRYPTION_FAILED_PLACEHOLDER`]; the stored row is never mutated on
/// read. A plaintext value (pre-migration legacy row) passes through as is.
pub fn entry_response(entry: &VaultEntry, cipher: &FieldCipher) -> VaultEntryResponse {
    let secret = if FieldCipher::is_envelope(&entry.secret) {
        cipher.decrypt(&entry.secret).unwrap_or_else(|e| {
            tracing::warn!(entry_id = %entry.id, error = %e, "stored secret failed to decrypt");
            DECRYPTION_FAILED_PLACEHOLDER.to_string()
        })
    } else {
        entry.secret.clone()
    };

    VaultEntryResponse {
        id: entry.id.clone(),
        owner_id: entry.owner_id.clone(),
        label: entry.label.clone(),
        account: entry.account.clone(),
        secret,
        created_at: entry.created_at,
        updated_at: entry.updated_at,
    }
}
