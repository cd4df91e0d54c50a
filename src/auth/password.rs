//! Password hashing and verification for inkpost.
//!
//! Uses bcrypt with a fixed cost factor.

use thiserror::Error;

/// bcrypt cost factor.
pub const HASH_COST: u32 = 10;

/// Password-related errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    HashError(String),

    /// The stored hash is not a valid bcrypt hash.
    #[error("invalid password hash format")]
    InvalidHash,
}

/// Hash a password with bcrypt.
///
/// The salt is random per call, so hashing the same password twice gives
/// two different strings.
///
/// # Examples
///
/// ```
/// use inkpost::hash_password;
///
/// let hash = hash_password("my_secure_password").unwrap();
/// assert!(hash.starts_with("$2b$10$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    bcrypt::hash(password, HASH_COST).map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Verify a password against a stored hash.
///
/// Returns `Ok(false)` on a mismatch. The final comparison is constant
/// time. A hash that cannot be parsed is reported as
/// [`PasswordError::InvalidHash`].
///
/// # Examples
///
/// ```
/// use inkpost::{hash_password, verify_password};
///
/// let hash = hash_password("my_secure_password").unwrap();
/// assert!(verify_password("my_secure_password", &hash).unwrap());
/// assert!(!verify_password("wrong_password", &hash).unwrap());
/// ```
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    bcrypt::verify(password, hash).map_err(|_| PasswordError::InvalidHash)
}
