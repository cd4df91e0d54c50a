//! Session cookie authentication.

use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;

use crate::auth::SESSION_COOKIE;
use crate::db::PublicUser;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Extractor for the user behind the session cookie.
///
/// Rejects with 401 when the cookie is missing, empty, tampered with,
/// expired, or names a user that no longer exists.
#[derive(Debug, Clone)]
pub struct AuthUser(pub PublicUser);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ApiError::unauthorized("Missing session cookie"))?;

        state
            .auth
            .user_from_token(token)
            .await
            .map(AuthUser)
            .map_err(ApiError::from_session_error)
    }
}
