//! Authentication handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::auth::{AuthenticationService, SessionTokens};
use crate::config::AuthConfig;
use crate::db::{PostRepository, PublicUser, UserRepository};
use crate::posts::PostService;
use crate::web::dto::{LoginRequest, RegisterRequest, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;
use crate::Database;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Registration, log-in and session checks.
    pub auth: AuthenticationService,
    /// Post CRUD.
    pub posts: PostService,
}

impl AppState {
    /// Create a new application state.
    pub fn new(auth: AuthenticationService, posts: PostService) -> Self {
        Self { auth, posts }
    }

    /// Wire the SQLite stores of `db` into the services.
    pub fn from_database(db: &Database, config: &AuthConfig) -> Self {
        let users = Arc::new(UserRepository::new(db.pool().clone()));
        let posts = Arc::new(PostRepository::new(db.pool().clone()));
        let tokens = SessionTokens::new(&config.jwt_secret, config.jwt_expiration_secs);

        Self::new(
            AuthenticationService::new(users, tokens),
            PostService::new(posts),
        )
    }
}

/// POST /authentication/register - Create an account.
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    let user = state.auth.register(req.into()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /authentication/log-in - Check credentials and set the session cookie.
pub async fn log_in(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.auth.authenticate(&req.email, &req.password).await?;
    let cookie = state.auth.issue_session_cookie(user.id)?;
    Ok(([(SET_COOKIE, cookie)], Json(user)))
}

/// POST /authentication/log-out - Clear the session cookie.
pub async fn log_out(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ([(SET_COOKIE, state.auth.logout_cookie())], StatusCode::OK)
}

/// GET /authentication - The user behind the session cookie.
pub async fn authenticated_user(AuthUser(user): AuthUser) -> Json<PublicUser> {
    Json(user)
}
