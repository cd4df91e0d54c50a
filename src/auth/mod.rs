//! Authentication module for inkpost.
//!
//! Password hashing, session token signing, and the service that ties
//! them to the user store.

mod password;
mod service;
mod token;

pub use password::{hash_password, verify_password, PasswordError, HASH_COST};
pub use service::{AuthenticationService, RegistrationRequest, LOGOUT_COOKIE, SESSION_COOKIE};
pub use token::{SessionTokens, TokenError, TokenPayload};
