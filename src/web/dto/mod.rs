//! Data transfer objects for the HTTP API.

pub mod request;
pub mod validation;

pub use request::{CreatePostRequest, LoginRequest, RegisterRequest, UpdatePostRequest};
pub use validation::ValidatedJson;
