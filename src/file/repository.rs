//! File metadata repository.
//!
//! Every query is parameterized by the owner identifier; there is no
//! unscoped access path.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::record::{FileQuery, FileRecord, NewFileRecord, TrashFilter};
use crate::{Result, StrongboxError};

const SELECT_COLUMNS: &str = "id, storage_key, original_name, mimetype, size, owner_id, \
     uploaded_at, deleted, deleted_at";

/// Repository for file metadata records.
pub struct FileRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FileRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new record and return it.
    pub async fn create(&self, new_record: &NewFileRecord) -> Result<FileRecord> {
        let result = sqlx::query(
            "INSERT INTO files (storage_key, original_name, mimetype, size, owner_id)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&new_record.storage_key)
        .bind(&new_record.original_name)
        .bind(&new_record.mimetype)
        .bind(new_record.size)
        .bind(&new_record.owner_id)
        .execute(self.pool)
        .await?;

        let id = result.last_insert_rowid();
        let record = sqlx::query_as::<_, FileRecord>(&format!(
            "SELECT {SELECT_COLUMNS} FROM files WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        record.ok_or_else(|| StrongboxError::NotFound("File".to_string()))
    }

    /// Get a record by storage key, scoped to its owner.
    ///
    /// Returns `None` for absent keys and for keys owned by someone else.
    pub async fn get_by_key(&self, storage_key: &str, owner_id: &str) -> Result<Option<FileRecord>> {
        let record = sqlx::query_as::<_, FileRecord>(&format!(
            "SELECT {SELECT_COLUMNS} FROM files WHERE storage_key = ? AND owner_id = ?"
        ))
        .bind(storage_key)
        .bind(owner_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(record)
    }

    /// Fetch one page of records matching the query.
    ///
    /// Sorted newest first, with the row id as tiebreaker so the order is
    /// stable across pages.
    pub async fn find_page(&self, query: &FileQuery) -> Result<Vec<FileRecord>> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {SELECT_COLUMNS} FROM files WHERE "));
        Self::push_filters(&mut builder, query);

        builder.push(" ORDER BY uploaded_at DESC, id DESC LIMIT ");
        builder.push_bind(query.limit as i64);
        builder.push(" OFFSET ");
        builder.push_bind(query.offset() as i64);

        let records = builder
            .build_query_as::<FileRecord>()
            .fetch_all(self.pool)
            .await?;

        Ok(records)
    }

    /// Count all records matching the query, ignoring pagination.
    pub async fn count(&self, query: &FileQuery) -> Result<i64> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT COUNT(*) FROM files WHERE ");
        Self::push_filters(&mut builder, query);

        let (count,): (i64,) = builder.build_query_as().fetch_one(self.pool).await?;

        Ok(count)
    }

    /// Mark an active record as trashed.
    ///
    /// Returns `false` when no active record matches (absent, other owner,
    /// or already trashed). The state precondition lives in the WHERE clause
    /// so concurrent transitions resolve atomically.
    pub async fn mark_trashed(&self, storage_key: &str, owner_id: &str) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE files SET deleted = 1, deleted_at = datetime('now')
             WHERE storage_key = ? AND owner_id = ? AND deleted = 0",
        )
        .bind(storage_key)
        .bind(owner_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Mark a trashed record as active again.
    ///
    /// Returns `false` when no trashed record matches.
    pub async fn mark_restored(&self, storage_key: &str, owner_id: &str) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE files SET deleted = 0, deleted_at = NULL
             WHERE storage_key = ? AND owner_id = ? AND deleted = 1",
        )
        .bind(storage_key)
        .bind(owner_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a record permanently, in any lifecycle state.
    ///
    /// Returns `false` if no record was deleted (a concurrent purge may have
    /// won the race).
    pub async fn delete(&self, storage_key: &str, owner_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM files WHERE storage_key = ? AND owner_id = ?")
            .bind(storage_key)
            .bind(owner_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Push the shared owner / trash / search filters onto a query builder.
    fn push_filters(builder: &mut QueryBuilder<'_, Sqlite>, query: &FileQuery) {
        builder.push("owner_id = ");
        builder.push_bind(query.owner_id.clone());

        builder.push(" AND deleted = ");
        builder.push_bind(matches!(query.trash, TrashFilter::Trashed));

        if let Some(ref search) = query.search {
            // SQLite LIKE is case-insensitive for ASCII
            builder.push(" AND original_name LIKE ");
            builder.push_bind(format!("%{}%", escape_like(search)));
            builder.push(" ESCAPE '\\'");
        }
    }
}

/// Escape LIKE wildcards so a search term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
