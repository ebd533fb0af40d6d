//! Owner identity middleware.
//!
//! Token verification happens upstream; the authenticating proxy injects the
//! trusted owner identifier as the `X-Owner-Id` header. This extractor is the
//! only place identity enters the API.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};

use crate::web::error::ApiError;

/// Header carrying the trusted owner identifier.
pub const OWNER_ID_HEADER: &str = "x-owner-id";

/// Extractor for the request owner.
///
/// Rejects with 401 when the header is missing, empty, or not valid UTF-8.
#[derive(Debug, Clone)]
pub struct Owner(pub String);

impl<S> FromRequestParts<S> for Owner
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let owner_id = parts
                .headers
                .get(OWNER_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| ApiError::unauthorized("Missing owner identity"))?;

            Ok(Owner(owner_id.to_string()))
        })
    }
}
