//! User handlers

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::WithRejection;
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::{CreateUserRequest, NewUser},
    state::AppState,
};

/// Register a user; `password` must already be hashed by the caller
pub async fn create_user(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateUserRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let new_user = NewUser::try_from(payload)?;
    let user = state.user_store.create(new_user).await?;

    info!("User {} registered as {}", user.id, user.user_type);
    Ok((StatusCode::CREATED, Json(user)))
}

/// The record of the authenticated caller
pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .user_store
        .find_by_id(caller.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}
