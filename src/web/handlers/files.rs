//! File handlers for the Web API.

use axum::{
    body::Body,
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::file::UploadRequest;
use crate::web::dto::{
    ApiResponse, FileListItem, FileSummary, ListFilesQuery, MessageResponse, PaginatedResponse,
    UploadResponse,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::Owner;

/// Generate a safe Content-Disposition header value for file downloads.
///
/// Control characters are stripped to prevent header injection; non-ASCII
/// names get an RFC 5987 `filename*` parameter alongside a sanitized ASCII
/// fallback.
fn content_disposition_header(filename: &str) -> String {
    let sanitized: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' => '_',
            '\\' => '_',
            _ => c,
        })
        .collect();

    if filename.is_ascii() && !filename.chars().any(|c| c.is_control() || c == '"' || c == '\\') {
        return format!("attachment; filename=\"{}\"", filename);
    }

    let encoded = urlencoding::encode(filename);

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        sanitized, encoded
    )
}

/// POST /api/files/upload - Upload a file.
///
/// Request body: multipart/form-data with a "file" field.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    Owner(owner_id): Owner,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadResponse>>), ApiError> {
    let mut filename: Option<String> = None;
    let mut mimetype: Option<String> = None;
    let mut content: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to read multipart field: {}", e);
        ApiError::bad_request("Invalid multipart data")
    })? {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            filename = field.file_name().map(|s| s.to_string());
            mimetype = field.content_type().map(|s| s.to_string());
            content = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| {
                        tracing::error!("Failed to read file content: {}", e);
                        ApiError::bad_request("Failed to read file")
                    })?
                    .to_vec(),
            );
        }
    }

    let filename = filename.ok_or_else(|| ApiError::bad_request("No file provided"))?;
    let content = content.ok_or_else(|| ApiError::bad_request("No file content"))?;

    let mut request = UploadRequest::new(filename, content);
    if let Some(mimetype) = mimetype {
        request = request.with_mimetype(mimetype);
    }

    let record = state.service().upload(&owner_id, request).await?;

    let response = UploadResponse {
        message: "File uploaded successfully".to_string(),
        file: FileSummary::from(&record),
    };

    Ok((StatusCode::CREATED, Json(ApiResponse::new(response))))
}

/// GET /api/files - List files with pagination, search, and trash filter.
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    Owner(owner_id): Owner,
    Query(params): Query<ListFilesQuery>,
) -> Result<Json<PaginatedResponse<FileListItem>>, ApiError> {
    let query = params.into_file_query(&owner_id);
    let page = state.service().list(&query).await?;

    Ok(Json(PaginatedResponse::from_page(&page)))
}

/// GET /api/files/info/:key - Get file metadata.
pub async fn file_info(
    State(state): State<Arc<AppState>>,
    Owner(owner_id): Owner,
    Path(storage_key): Path<String>,
) -> Result<Json<ApiResponse<FileSummary>>, ApiError> {
    let record = state.service().info(&storage_key, &owner_id).await?;

    Ok(Json(ApiResponse::new(FileSummary::from(&record))))
}

/// GET /api/files/download/:key - Download a file.
///
/// The blob is streamed straight from disk into the response body.
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Owner(owner_id): Owner,
    Path(storage_key): Path<String>,
) -> Result<Response<Body>, ApiError> {
    let (record, file) = state.service().download(&storage_key, &owner_id).await?;

    let stream = ReaderStream::new(file);

    let response = Response::builder()
        .header(header::CONTENT_TYPE, record.mimetype)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(&record.original_name),
        )
        .header(header::CONTENT_LENGTH, record.size)
        .body(Body::from_stream(stream))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal("Failed to build response")
        })?;

    Ok(response)
}

/// DELETE /api/files/delete/:key - Move a file to the trash.
pub async fn trash_file(
    State(state): State<Arc<AppState>>,
    Owner(owner_id): Owner,
    Path(storage_key): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.service().move_to_trash(&storage_key, &owner_id).await?;

    Ok(Json(ApiResponse::new(MessageResponse::new(
        "File moved to trash",
    ))))
}

/// POST /api/files/restore/:key - Restore a file from the trash.
pub async fn restore_file(
    State(state): State<Arc<AppState>>,
    Owner(owner_id): Owner,
    Path(storage_key): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.service().restore(&storage_key, &owner_id).await?;

    Ok(Json(ApiResponse::new(MessageResponse::new(
        "File restored successfully",
    ))))
}

/// DELETE /api/files/permanent/:key - Permanently delete a file.
pub async fn permanent_delete_file(
    State(state): State<Arc<AppState>>,
    Owner(owner_id): Owner,
    Path(storage_key): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.service().purge(&storage_key, &owner_id).await?;

    Ok(Json(ApiResponse::new(MessageResponse::new(
        "File permanently deleted",
    ))))
}
