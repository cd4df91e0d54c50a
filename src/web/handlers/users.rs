//! User handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use super::AppState;
use crate::db::PublicUser;
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

/// GET /users/:id - Public profile of a user. Requires a session.
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    _viewer: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<PublicUser>, ApiError> {
    Ok(Json(state.auth.get_user(id).await?))
}
