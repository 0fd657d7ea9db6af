//! API service routes

use axum::{
    Json, Router, middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    AppState,
    controllers::{restaurant, user},
    middleware::auth_middleware,
};

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/users", user_routes(state.clone()))
        .nest("/api/restaurant", restaurant_routes(state.clone()))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Restaurant resource, each route with at most one gate and one handler
pub fn restaurant_routes(state: AppState) -> Router<AppState> {
    let gate = middleware::from_fn_with_state(state, auth_middleware);

    Router::new()
        .route("/", post(restaurant::add_restaurant).route_layer(gate))
        .route("/:code", get(restaurant::get_random_restaurants))
        .route("/all/:code", get(restaurant::get_all_nearby_restaurants))
        .route("/byId/:id", get(restaurant::get_restaurant_by_id))
        // Ungated, and nested under the mount as /restaurants/verify/:id.
        .route("/restaurants/verify/:id", put(restaurant::verify_restaurant))
}

pub fn user_routes(state: AppState) -> Router<AppState> {
    let gate = middleware::from_fn_with_state(state, auth_middleware);

    Router::new().route(
        "/",
        post(user::create_user).merge(get(user::get_current_user).route_layer(gate)),
    )
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "foodl-api"
    }))
}
