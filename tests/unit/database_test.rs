//! Unit tests for database open and schema migrations.

use passvault::database::{migrations, Database};

#[test]
fn test_open_in_memory_runs_migrations() {
    let db = Database::open_in_memory().unwrap();
    let version = migrations::get_schema_version(&db.connection());
    assert_eq!(version, migrations::CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_vault_entries_table_exists() {
    let db = Database::open_in_memory().unwrap();
    db.connection()
        .execute(
            "INSERT INTO vault_entries (id, owner_id, label, account, secret, created_at, updated_at)
             VALUES ('e1', 'o1', 'example.com', 'user', 'aa:bb:cc:dd', 1, 1)",
            [],
        )
        .unwrap();

    let count: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM vault_entries", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_reopening_database_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vault.db");

    {
        let db = Database::open(&path).unwrap();
        db.connection()
            .execute(
                "INSERT INTO vault_entries (id, owner_id, label, account, secret, created_at, updated_at)
                 VALUES ('e1', 'o1', 'example.com', 'user', 'aa:bb:cc:dd', 1, 1)",
                [],
            )
            .unwrap();
    }

    // Second open re-runs migrations without clobbering data.
    let db = Database::open(&path).unwrap();
    let count: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM vault_entries", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(
        migrations::get_schema_version(&db.connection()),
        migrations::CURRENT_SCHEMA_VERSION
    );
}

#[test]
fn test_owner_index_exists() {
    let db = Database::open_in_memory().unwrap();
    let count: i64 = db
        .connection()
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name = 'idx_vault_entries_owner'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 1);
}
