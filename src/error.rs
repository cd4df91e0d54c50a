//! Error types for inkpost.

use thiserror::Error;

/// Infrastructure error type for inkpost.
///
/// These surface while the process is starting up (configuration, database
/// setup, logging). Request handling uses [`ServiceError`] instead.
#[derive(Error, Debug)]
pub enum InkpostError {
    /// Database error.
    ///
    /// Database errors from sqlx are automatically converted.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Validation error.
    #[error("validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for InkpostError {
    fn from(e: sqlx::Error) -> Self {
        InkpostError::Database(e.to_string())
    }
}

/// Result type alias for inkpost infrastructure operations.
pub type Result<T> = std::result::Result<T, InkpostError>;

/// Errors returned by the authentication and post services.
///
/// Every store failure is classified into one of these before it leaves a
/// service. The messages are user-facing; internal causes are logged, not
/// carried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Registration email is already taken.
    #[error("User with that email already exists")]
    DuplicateUser,

    /// Login failed. Deliberately does not say why.
    #[error("Wrong credentials provided")]
    InvalidCredentials,

    /// The requested record does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Unexpected store or infrastructure failure.
    #[error("Something went wrong")]
    InternalFailure,
}

/// Result type alias for service operations.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
