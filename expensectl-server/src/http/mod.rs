//! HTTP server layer
//!
//! Axum server with:
//! - Basic auth in front of every expense route
//! - Request tracing
//! - Graceful shutdown with a drain deadline
//! - JSON error responses (`{"message": ...}`)

pub mod auth;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use auth::Credentials;
pub use error::ApiError;
pub use server::{build_router, run_server, serve, AppState, ServerConfig, ServerError};
