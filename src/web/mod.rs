//! HTTP layer for inkpost.
//!
//! An axum router over the authentication and post services, with the
//! session carried in an `Authentication` cookie.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::{create_app, create_router};
pub use server::WebServer;
