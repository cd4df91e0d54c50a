//! HTTP handlers.

pub mod auth;
pub mod posts;
pub mod users;

pub use auth::*;
pub use posts::*;
pub use users::*;
