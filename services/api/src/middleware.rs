//! Authentication middleware for JWT token validation

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use tracing::warn;
use uuid::Uuid;

use crate::{error::ApiError, models::UserType, state::AppState};

/// Authenticated user information
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub user_type: UserType,
}

/// Authentication middleware
///
/// Rejects the request with 401 unless it carries a valid bearer token; on
/// success the caller is available to handlers as `Extension<AuthUser>`.
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(ApiError::Unauthorized)?;

    let claims = state
        .jwt_service
        .validate_token(bearer.token())
        .map_err(|e| {
            warn!("Rejected bearer token: {}", e);
            ApiError::Unauthorized
        })?;

    let user = AuthUser {
        id: claims.sub,
        email: claims.email,
        user_type: claims.user_type,
    };

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Allow the caller when they own the resource or are an admin
pub fn authorize_owner_or_admin(user: &AuthUser, owner: Uuid) -> Result<(), ApiError> {
    match user.user_type {
        UserType::Admin => Ok(()),
        UserType::Client | UserType::Vendor | UserType::Driver if user.id == owner => Ok(()),
        UserType::Client | UserType::Vendor | UserType::Driver => Err(ApiError::Forbidden),
    }
}
