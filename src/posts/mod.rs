//! Posts module for inkpost.
//!
//! A thin service over the post store that turns missing records into
//! [`ServiceError::NotFound`](crate::ServiceError::NotFound).

mod service;

pub use service::PostService;
