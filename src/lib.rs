//! inkpost - a small posts API with cookie-based session authentication.
//!
//! Users register and log in with an email and password; a signed session
//! token travels in an `HttpOnly` cookie. Posts are plain CRUD over SQLite.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod posts;
pub mod web;

pub use auth::{
    hash_password, verify_password, AuthenticationService, PasswordError, RegistrationRequest,
    SessionTokens, TokenPayload,
};
pub use config::Config;
pub use db::{Database, NewPost, Post, PostUpdate, PublicUser};
pub use error::{InkpostError, Result, ServiceError, ServiceResult};
pub use posts::PostService;
pub use web::{create_app, AppState, WebServer};
