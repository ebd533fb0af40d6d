//! Data transfer objects for the strongbox Web API.

mod request;
mod response;

pub use request::ListFilesQuery;
pub use response::{
    ApiResponse, FileListItem, FileSummary, MessageResponse, PaginatedResponse, PaginationMeta,
    UploadResponse,
};
