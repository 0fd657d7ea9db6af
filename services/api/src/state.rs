//! Application state shared across handlers

use sqlx::PgPool;
use std::sync::Arc;

use crate::{
    jwt::JwtService,
    repositories::{
        InMemoryRestaurantRepository, InMemoryUserRepository, PgRestaurantRepository,
        PgUserRepository, RestaurantStore, UserStore,
    },
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub user_store: Arc<dyn UserStore>,
    pub restaurant_store: Arc<dyn RestaurantStore>,
    pub jwt_service: JwtService,
    /// Upper bound on restaurants returned by the random listing
    pub sample_size: usize,
}

impl AppState {
    /// State backed by PostgreSQL repositories sharing one pool
    pub fn postgres(pool: PgPool, jwt_service: JwtService, sample_size: usize) -> Self {
        Self {
            user_store: Arc::new(PgUserRepository::new(pool.clone())),
            restaurant_store: Arc::new(PgRestaurantRepository::new(pool)),
            jwt_service,
            sample_size,
        }
    }

    /// State backed by empty in-memory repositories
    pub fn in_memory(jwt_service: JwtService, sample_size: usize) -> Self {
        Self {
            user_store: Arc::new(InMemoryUserRepository::new()),
            restaurant_store: Arc::new(InMemoryRestaurantRepository::new()),
            jwt_service,
            sample_size,
        }
    }
}
