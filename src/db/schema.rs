//! Database schema migrations for strongbox.
//!
//! Each entry in [`MIGRATIONS`] is applied once, in order, inside its own
//! transaction. Never edit an already-shipped migration; append a new one.

/// All schema migrations, in order of application.
pub const MIGRATIONS: &[&str] = &[
    // v1: files table
    "CREATE TABLE files (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        storage_key     TEXT NOT NULL UNIQUE,
        original_name   TEXT NOT NULL,
        mimetype        TEXT NOT NULL,
        size            INTEGER NOT NULL,
        owner_id        TEXT NOT NULL,
        uploaded_at     TEXT NOT NULL DEFAULT (datetime('now')),
        deleted         INTEGER NOT NULL DEFAULT 0,
        deleted_at      TEXT,
        CHECK (size >= 0),
        CHECK ((deleted = 0 AND deleted_at IS NULL) OR (deleted = 1 AND deleted_at IS NOT NULL))
    );
    CREATE INDEX idx_files_owner_uploaded ON files(owner_id, uploaded_at);
    CREATE INDEX idx_files_owner_deleted ON files(owner_id, deleted);",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_not_empty() {
        assert!(!MIGRATIONS.is_empty());
    }

    #[test]
    fn test_first_migration_creates_files_table() {
        assert!(MIGRATIONS[0].contains("CREATE TABLE files"));
    }
}
