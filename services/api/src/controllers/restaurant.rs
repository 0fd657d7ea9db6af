//! Restaurant handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    middleware::{AuthUser, authorize_owner_or_admin},
    models::CreateRestaurantRequest,
    state::AppState,
};

fn restaurant_not_found() -> ApiError {
    ApiError::NotFound("Restaurant not found".to_string())
}

/// Path ids that are not UUIDs cannot name a restaurant.
fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| restaurant_not_found())
}

/// Create a restaurant owned by the caller, or by `owner` when an admin asks
pub async fn add_restaurant(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateRestaurantRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let owner = payload.owner.unwrap_or(caller.id);
    authorize_owner_or_admin(&caller, owner)?;

    let new_restaurant = payload.validate(owner)?;
    let restaurant = state.restaurant_store.create(new_restaurant).await?;

    info!("Restaurant {} created by {}", restaurant.id, caller.id);
    Ok((StatusCode::CREATED, Json(restaurant)))
}

/// A random handful of available restaurants in a region
pub async fn get_random_restaurants(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let restaurants = state
        .restaurant_store
        .sample_by_code(&code, state.sample_size)
        .await?;

    Ok(Json(restaurants))
}

/// Every available restaurant in a region
pub async fn get_all_nearby_restaurants(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let restaurants = state.restaurant_store.all_by_code(&code).await?;

    Ok(Json(restaurants))
}

/// A single restaurant by id
pub async fn get_restaurant_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let restaurant = state
        .restaurant_store
        .find_by_id(parse_id(&id)?)
        .await?
        .ok_or_else(restaurant_not_found)?;

    Ok(Json(restaurant))
}

/// Flag a restaurant as verified and return the updated record
pub async fn verify_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let restaurant = state
        .restaurant_store
        .mark_verified(parse_id(&id)?)
        .await?
        .ok_or_else(restaurant_not_found)?;

    info!("Restaurant {} verified", restaurant.id);
    Ok(Json(restaurant))
}
