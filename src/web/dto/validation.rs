//! Validated JSON extraction and custom field validators.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::web::error::{ApiError, ErrorCode};

/// JSON body extractor that runs `validator` checks after deserializing.
///
/// Malformed JSON is a 400. A body with missing or mistyped fields, or one
/// that fails validation, is a 422.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| match e.status() {
                StatusCode::UNPROCESSABLE_ENTITY => {
                    ApiError::new(ErrorCode::ValidationError, e.body_text())
                }
                _ => ApiError::bad_request(format!("Invalid JSON: {}", e.body_text())),
            })?;

        value.validate().map_err(ApiError::from_validation_errors)?;

        Ok(ValidatedJson(value))
    }
}

/// Longest password bcrypt actually reads, in bytes.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Reject passwords bcrypt would silently truncate.
pub fn bcrypt_length(value: &str) -> Result<(), validator::ValidationError> {
    if value.len() > MAX_PASSWORD_BYTES {
        return Err(validator::ValidationError::new("bcrypt_length")
            .with_message("Must be at most 72 bytes".into()));
    }
    Ok(())
}

/// Validate that a string does not contain control characters or NULL bytes.
pub fn no_control_chars(value: &str) -> Result<(), validator::ValidationError> {
    if value
        .chars()
        .any(|c| c.is_control() && c != '\n' && c != '\r' && c != '\t')
    {
        return Err(validator::ValidationError::new("no_control_chars")
            .with_message("Must not contain control characters".into()));
    }
    Ok(())
}

/// Validate that a string is not empty after trimming whitespace.
pub fn not_empty_trimmed(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("not_empty_trimmed")
            .with_message("Must not be empty".into()));
    }
    Ok(())
}
