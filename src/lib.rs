//! strongbox - personal file vault server.
//!
//! Authenticated owners upload, list, search, trash, restore, permanently
//! delete, and download binary files. File metadata lives in SQLite, blob
//! content in a sharded on-disk store; the two are kept consistent with
//! compensating actions rather than cross-store transactions.

pub mod config;
pub mod db;
pub mod error;
pub mod file;
pub mod logging;
pub mod web;

pub use config::Config;
pub use db::Database;
pub use error::{Result, StrongboxError};
pub use file::{
    BlobStore, FilePage, FileQuery, FileRecord, FileRepository, FileService, TrashFilter,
    UploadRequest,
};
pub use web::WebServer;
