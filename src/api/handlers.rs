//! Vault API handlers.
//!
//! Thin translation between HTTP and the store: extract the principal,
//! delegate, map the result. Ownership scoping happens in the store's
//! queries, not here.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde_json::json;

use crate::types::errors::VaultError;
use crate::types::vault::VaultEntryInput;

use super::auth::Principal;
use super::{entry_response, AppState};

/// Liveness probe. Unauthenticated.
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

/// `GET /api/passwords`: the caller's entries, newest first, decrypted.
pub async fn list_entries(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Response {
    match state.store.list_for_owner(&principal.user_id).await {
        Ok(entries) => {
            let body: Vec<_> = entries
                .iter()
                .map(|entry| entry_response(entry, &state.cipher))
                .collect();
            Json(body).into_response()
        }
        Err(err) => error_response(err),
    }
}

/// `POST /api/passwords`: create an entry for the caller.
pub async fn create_entry(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(input): Json<VaultEntryInput>,
) -> Response {
    match state.store.create(&principal.user_id, input).await {
        Ok(entry) => (
            StatusCode::CREATED,
            Json(entry_response(&entry, &state.cipher)),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

/// `PUT /api/passwords/{id}`: update an entry within the caller's scope.
pub async fn update_entry(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(input): Json<VaultEntryInput>,
) -> Response {
    match state.store.update(&principal.user_id, &id, input).await {
        Ok(entry) => Json(entry_response(&entry, &state.cipher)).into_response(),
        Err(err) => error_response(err),
    }
}

/// `DELETE /api/passwords/{id}`: delete an entry within the caller's scope.
pub async fn delete_entry(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Response {
    match state.store.delete(&principal.user_id, &id).await {
        Ok(()) => Json(json!({ "deleted": true })).into_response(),
        Err(err) => error_response(err),
    }
}

/// Maps store errors onto the API's status taxonomy.
///
/// Not-found and foreign-owner outcomes are already collapsed by the store;
/// everything unexpected becomes an opaque 500.
fn error_response(err: VaultError) -> Response {
    match err {
        VaultError::Validation(msg) => {
            (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
        }
        VaultError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "password entry not found" })),
        )
            .into_response(),
        other => {
            tracing::error!(error = %other, "vault operation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal server error" })),
            )
                .into_response()
        }
    }
}
