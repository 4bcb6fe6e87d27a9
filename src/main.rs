//! passvault API server.
//!
//! Loads configuration from the environment, opens the vault database, and
//! serves the authenticated password CRUD routes. Refuses to start without
//! the master secret or the auth secret: a vault that cannot encrypt or
//! cannot verify callers must not come up half-working.

use std::sync::Arc;

use passvault::api::auth::{AuthGate, HmacAuthGate};
use passvault::api::{self, AppState};
use passvault::config::Config;
use passvault::database::Database;
use passvault::services::field_cipher::FieldCipher;
use passvault::services::vault_store::VaultStore;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "passvault=info".into()),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "configuration error");
            std::process::exit(1);
        }
    };

    let auth_secret = match config.require_auth_secret() {
        Ok(secret) => secret.to_string(),
        Err(e) => {
            tracing::error!(error = %e, "configuration error");
            std::process::exit(1);
        }
    };

    let cipher = match FieldCipher::new(&config.master_secret) {
        Ok(cipher) => Arc::new(cipher),
        Err(e) => {
            tracing::error!(error = %e, "configuration error");
            std::process::exit(1);
        }
    };

    let auth: Arc<dyn AuthGate> = match HmacAuthGate::new(&auth_secret) {
        Ok(gate) => Arc::new(gate),
        Err(e) => {
            tracing::error!(error = %e, "configuration error");
            std::process::exit(1);
        }
    };

    let db = match Database::open(&config.database_path) {
        Ok(db) => Arc::new(db),
        Err(e) => {
            tracing::error!(error = %e, path = %config.database_path.display(), "failed to open database");
            std::process::exit(1);
        }
    };

    let store = Arc::new(VaultStore::new(db, cipher.clone()));
    let state = AppState {
        store,
        cipher,
        auth,
    };

    let app = api::router(state);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, addr = %config.bind_addr, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(addr = %config.bind_addr, "passvault listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server terminated");
        std::process::exit(1);
    }
}
