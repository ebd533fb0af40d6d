//! File service: the lifecycle manager tying the metadata store and the
//! blob store together.
//!
//! There is no transaction spanning both stores. Upload compensates by
//! deleting the blob when the record insert fails; purge removes the blob
//! first and tolerates it already being gone.

use sqlx::SqlitePool;
use tracing::warn;

use super::record::{FilePage, FileQuery, FileRecord, NewFileRecord};
use super::repository::FileRepository;
use super::storage::BlobStore;
use super::MAX_FILENAME_LENGTH;
use crate::{Result, StrongboxError};

/// An upload request: declared name and mimetype plus the payload.
#[derive(Debug)]
pub struct UploadRequest {
    pub original_name: String,
    pub mimetype: Option<String>,
    pub content: Vec<u8>,
}

impl UploadRequest {
    pub fn new(original_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            original_name: original_name.into(),
            mimetype: None,
            content,
        }
    }

    pub fn with_mimetype(mut self, mimetype: impl Into<String>) -> Self {
        let mimetype = mimetype.into();
        if !mimetype.is_empty() {
            self.mimetype = Some(mimetype);
        }
        self
    }
}

/// Service coordinating file metadata and blob storage.
pub struct FileService<'a> {
    pool: &'a SqlitePool,
    store: &'a BlobStore,
    max_upload_size: u64,
}

impl<'a> FileService<'a> {
    pub fn new(pool: &'a SqlitePool, store: &'a BlobStore, max_upload_size: u64) -> Self {
        Self {
            pool,
            store,
            max_upload_size,
        }
    }

    fn repo(&self) -> FileRepository<'a> {
        FileRepository::new(self.pool)
    }

    /// Upload a file for the given owner.
    ///
    /// The blob is written before the record is inserted. If the insert
    /// fails, the orphaned blob is deleted; a cleanup failure is logged with
    /// the storage key and the original insert error is still reported.
    pub async fn upload(&self, owner_id: &str, request: UploadRequest) -> Result<FileRecord> {
        let name = request.original_name.trim();
        if name.is_empty() {
            return Err(StrongboxError::Validation(
                "file name must not be empty".to_string(),
            ));
        }
        if name.chars().count() > MAX_FILENAME_LENGTH {
            return Err(StrongboxError::Validation(format!(
                "file name too long (max {MAX_FILENAME_LENGTH} characters)"
            )));
        }
        if request.content.len() as u64 > self.max_upload_size {
            let max_mb = self.max_upload_size / 1024 / 1024;
            return Err(StrongboxError::Validation(format!(
                "file too large (max {max_mb}MB)"
            )));
        }

        let mimetype = request
            .mimetype
            .unwrap_or_else(|| mime_guess::from_path(name).first_or_octet_stream().to_string());

        let key = BlobStore::generate_key(name);
        self.store.put(&key, &request.content).await?;

        let new_record =
            NewFileRecord::new(&key, name, &mimetype, request.content.len() as i64, owner_id);

        match self.repo().create(&new_record).await {
            Ok(record) => Ok(record),
            Err(e) => {
                // The record never existed, so the blob must not either
                if let Err(cleanup_err) = self.store.delete(&key).await {
                    warn!(
                        storage_key = %key,
                        error = %cleanup_err,
                        "Failed to clean up orphaned blob after record insert failure"
                    );
                }
                Err(e)
            }
        }
    }

    /// List one page of the owner's files.
    pub async fn list(&self, query: &FileQuery) -> Result<FilePage> {
        let repo = self.repo();
        let total = repo.count(query).await?;
        let files = repo.find_page(query).await?;
        Ok(FilePage::new(files, query, total))
    }

    /// Get a single record by storage key.
    pub async fn info(&self, storage_key: &str, owner_id: &str) -> Result<FileRecord> {
        self.repo()
            .get_by_key(storage_key, owner_id)
            .await?
            .ok_or_else(|| StrongboxError::NotFound("File".to_string()))
    }

    /// Move an active file to the trash.
    pub async fn move_to_trash(&self, storage_key: &str, owner_id: &str) -> Result<()> {
        if self.repo().mark_trashed(storage_key, owner_id).await? {
            Ok(())
        } else {
            Err(StrongboxError::NotFound("File".to_string()))
        }
    }

    /// Restore a trashed file.
    pub async fn restore(&self, storage_key: &str, owner_id: &str) -> Result<()> {
        if self.repo().mark_restored(storage_key, owner_id).await? {
            Ok(())
        } else {
            Err(StrongboxError::NotFound("File".to_string()))
        }
    }

    /// Permanently delete a file, in any lifecycle state.
    ///
    /// The blob is removed first; a missing blob or a storage failure is
    /// logged and does not stop the record deletion. When the record delete
    /// affects no rows (a concurrent purge won) the caller sees `NotFound`.
    pub async fn purge(&self, storage_key: &str, owner_id: &str) -> Result<()> {
        let repo = self.repo();

        if repo.get_by_key(storage_key, owner_id).await?.is_none() {
            return Err(StrongboxError::NotFound("File".to_string()));
        }

        match self.store.delete(storage_key).await {
            Ok(true) => {}
            Ok(false) => {
                warn!(storage_key = %storage_key, "Blob already missing during permanent delete");
            }
            Err(e) => {
                warn!(
                    storage_key = %storage_key,
                    error = %e,
                    "Failed to delete blob during permanent delete"
                );
            }
        }

        if repo.delete(storage_key, owner_id).await? {
            Ok(())
        } else {
            Err(StrongboxError::NotFound("File".to_string()))
        }
    }

    /// Resolve a download: the record plus an open handle on its blob.
    ///
    /// A missing record yields `NotFound`; a record whose blob is gone
    /// yields `NotFoundOnStorage`. Trashed files remain downloadable.
    pub async fn download(
        &self,
        storage_key: &str,
        owner_id: &str,
    ) -> Result<(FileRecord, tokio::fs::File)> {
        let record = self.info(storage_key, owner_id).await?;
        let file = self.store.open(storage_key).await?;
        Ok((record, file))
    }
}
