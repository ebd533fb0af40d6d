//! Middleware for the strongbox Web API.

mod auth;
mod cors;

pub use auth::{Owner, OWNER_ID_HEADER};
pub use cors::create_cors_layer;
