//! Response DTOs for the strongbox Web API.

use serde::Serialize;

use crate::file::{FilePage, FileRecord};

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Plain message response for lifecycle operations.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// File summary exposed to clients. Internal ids and owner are withheld.
#[derive(Debug, Serialize)]
pub struct FileSummary {
    pub storage_key: String,
    pub original_name: String,
    pub mimetype: String,
    pub size: i64,
    pub uploaded_at: String,
}

impl From<&FileRecord> for FileSummary {
    fn from(record: &FileRecord) -> Self {
        Self {
            storage_key: record.storage_key.clone(),
            original_name: record.original_name.clone(),
            mimetype: record.mimetype.clone(),
            size: record.size,
            uploaded_at: record.uploaded_at.clone(),
        }
    }
}

/// Listing row: the summary plus trash state.
#[derive(Debug, Serialize)]
pub struct FileListItem {
    pub storage_key: String,
    pub original_name: String,
    pub mimetype: String,
    pub size: i64,
    pub uploaded_at: String,
    pub deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
}

impl From<&FileRecord> for FileListItem {
    fn from(record: &FileRecord) -> Self {
        Self {
            storage_key: record.storage_key.clone(),
            original_name: record.original_name.clone(),
            mimetype: record.mimetype.clone(),
            size: record.size,
            uploaded_at: record.uploaded_at.clone(),
            deleted: record.deleted,
            deleted_at: record.deleted_at.clone(),
        }
    }
}

/// Upload response: confirmation message plus the stored file summary.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub file: FileSummary,
}

/// Paginated listing response.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_files: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl PaginatedResponse<FileListItem> {
    /// Build a listing response from a domain page.
    pub fn from_page(page: &FilePage) -> Self {
        Self {
            data: page.files.iter().map(FileListItem::from).collect(),
            pagination: PaginationMeta {
                current_page: page.current_page,
                total_pages: page.total_pages,
                total_files: page.total_files,
                has_next_page: page.has_next_page,
                has_prev_page: page.has_prev_page,
            },
        }
    }
}
