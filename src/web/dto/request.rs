//! Request DTOs for the HTTP API.

use serde::Deserialize;
use validator::Validate;

use super::validation::{bcrypt_length, no_control_chars, not_empty_trimmed};
use crate::auth::RegistrationRequest;
use crate::db::{NewPost, PostUpdate};

/// Registration request.
#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    /// Login email.
    #[validate(email(message = "Must be a valid email address"))]
    pub email: String,
    /// Display name.
    #[validate(
        length(min = 1, max = 100, message = "Must be between 1 and 100 characters"),
        custom(function = "not_empty_trimmed"),
        custom(function = "no_control_chars")
    )]
    pub name: String,
    /// Plaintext password.
    #[validate(
        length(min = 1, message = "Must not be empty"),
        custom(function = "bcrypt_length")
    )]
    pub password: String,
}

impl From<RegisterRequest> for RegistrationRequest {
    fn from(req: RegisterRequest) -> Self {
        RegistrationRequest::new(req.email, req.name, req.password)
    }
}

/// Log-in request.
#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub password: String,
}

/// Post creation request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    /// Post title.
    #[validate(
        length(min = 1, max = 200, message = "Must be between 1 and 200 characters"),
        custom(function = "not_empty_trimmed"),
        custom(function = "no_control_chars")
    )]
    pub title: String,
    /// Post body.
    #[validate(custom(function = "not_empty_trimmed"))]
    pub content: String,
}

impl From<CreatePostRequest> for NewPost {
    fn from(req: CreatePostRequest) -> Self {
        NewPost::new(req.title, req.content)
    }
}

/// Partial post update. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePostRequest {
    /// New title.
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Must be between 1 and 200 characters"))]
    pub title: Option<String>,
    /// New body.
    #[serde(default)]
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub content: Option<String>,
}

impl From<UpdatePostRequest> for PostUpdate {
    fn from(req: UpdatePostRequest) -> Self {
        PostUpdate {
            title: req.title,
            content: req.content,
        }
    }
}
