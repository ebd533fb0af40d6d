//! Request handlers for the strongbox Web API.

mod files;

pub use files::{
    download_file, file_info, list_files, permanent_delete_file, restore_file, trash_file,
    upload_file,
};

use std::sync::Arc;

use crate::db::Database;
use crate::file::{BlobStore, FileService};

/// Shared application state.
pub struct AppState {
    /// Database handle.
    pub db: Arc<Database>,
    /// Blob store handle.
    pub store: BlobStore,
    /// Per-upload size ceiling in bytes.
    pub max_upload_size: u64,
}

impl AppState {
    pub fn new(db: Arc<Database>, store: BlobStore, max_upload_size: u64) -> Self {
        Self {
            db,
            store,
            max_upload_size,
        }
    }

    /// Build a file service borrowing this state.
    pub fn service(&self) -> FileService<'_> {
        FileService::new(self.db.pool(), &self.store, self.max_upload_size)
    }
}
