//! File vault module for strongbox.
//!
//! This module implements the file lifecycle:
//! - Upload: blob written first, metadata record second, with compensating
//!   blob cleanup when the record insert fails
//! - Listing: owner-scoped pagination with substring search and trash filter
//! - Trash / restore / permanent delete transitions
//! - Download resolution (record lookup plus blob open)

mod record;
mod repository;
mod service;
mod storage;

pub use record::{FilePage, FileQuery, FileRecord, NewFileRecord, TrashFilter};
pub use repository::FileRepository;
pub use service::{FileService, UploadRequest};
pub use storage::BlobStore;

/// Default number of files per listing page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound for a client-requested page size.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Maximum accepted length of an original file name, in characters.
pub const MAX_FILENAME_LENGTH: usize = 255;
