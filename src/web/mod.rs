//! Web API module for strongbox.
//!
//! Provides the REST interface over the file vault: upload, listing,
//! download, trash, restore, and permanent deletion.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::{create_health_router, create_router};
pub use server::WebServer;
