//! User model for inkpost.

use std::fmt;

use serde::Serialize;

/// User row as stored in the database.
///
/// Carries the password hash, so it never leaves the authentication
/// service. Callers get a [`PublicUser`] instead.
#[derive(Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Login email (unique, case-insensitive).
    pub email: String,
    /// Display name.
    pub name: String,
    /// bcrypt hash of the password.
    pub password: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &"[redacted]")
            .finish()
    }
}

impl User {
    /// Drop the credential and keep only what callers may see.
    pub fn scrub(self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email,
            name: self.name,
        }
    }
}

/// A user with the credential field removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUser {
    /// Unique user ID.
    pub id: i64,
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        user.scrub()
    }
}

/// Data for creating a new user.
#[derive(Clone)]
pub struct NewUser {
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Password hash. Must already be hashed.
    pub password: String,
}

impl NewUser {
    /// Create a new user record from an email, name and password hash.
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            password: password_hash.into(),
        }
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &"[redacted]")
            .finish()
    }
}
