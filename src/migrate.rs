//! passvault-migrate: one-time encryption of legacy plaintext secrets.
//!
//! Walks every vault entry and encrypts any secret that is not yet in
//! envelope form. Safe to re-run: rows already encrypted are skipped by the
//! envelope gate, and rows that fail are left untouched for a retry.

use std::sync::Arc;

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

    // The auth secret is not needed here; only the cipher and the database.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let cipher = match FieldCipher::new(&config.master_secret) {
        Ok(cipher) => Arc::new(cipher),
        Err(e) => {
            eprintln!("configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let db = match Database::open(&config.database_path) {
        Ok(db) => Arc::new(db),
        Err(e) => {
            eprintln!(
                "failed to open database at {}: {}",
                config.database_path.display(),
                e
            );
            std::process::exit(1);
        }
    };

    let store = VaultStore::new(db, cipher);

    match store.encrypt_plaintext_secrets().await {
        Ok(summary) => {
            println!("Migration summary:");
            println!("  total entries:      {}", summary.total);
            println!("  newly encrypted:    {}", summary.encrypted);
            println!("  already encrypted:  {}", summary.already_encrypted);
            println!("  failed:             {}", summary.failed);
            if summary.failed > 0 {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("migration failed: {}", e);
            std::process::exit(1);
        }
    }
}
