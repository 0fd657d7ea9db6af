//! Repositories for database operations
//!
//! Handlers talk to the [`UserStore`] and [`RestaurantStore`] traits. The
//! PostgreSQL repositories back them in production; the in-memory ones back
//! them when `FOODL_STORAGE=memory` and in tests.

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::migrate::Migrator;
use uuid::Uuid;

use crate::models::{NewRestaurant, NewUser, Restaurant, User};

pub mod memory;
pub mod restaurant;
pub mod user;

pub use memory::{InMemoryRestaurantRepository, InMemoryUserRepository};
pub use restaurant::PgRestaurantRepository;
pub use user::PgUserRepository;

/// Embedded schema migrations for the PostgreSQL backend
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Name of the unique index guarding `users.email`
pub const USERS_EMAIL_KEY: &str = "users_email_key";

/// Persistence contract for user records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user; a taken email fails with `DatabaseError::UniqueViolation`
    async fn create(&self, new_user: NewUser) -> DatabaseResult<User>;

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>>;

    /// Exact, case-sensitive email lookup
    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>>;

    /// Set the email verification flag, returning the updated record
    async fn set_verification(&self, id: Uuid, verified: bool) -> DatabaseResult<Option<User>>;
}

/// Persistence contract for restaurant records
#[async_trait]
pub trait RestaurantStore: Send + Sync {
    async fn create(&self, new_restaurant: NewRestaurant) -> DatabaseResult<Restaurant>;

    /// Up to `limit` available restaurants in `code`, in random order
    async fn sample_by_code(&self, code: &str, limit: usize) -> DatabaseResult<Vec<Restaurant>>;

    /// Every available restaurant in `code`, oldest first
    async fn all_by_code(&self, code: &str) -> DatabaseResult<Vec<Restaurant>>;

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Restaurant>>;

    /// Mark a restaurant verified, returning the updated record
    async fn mark_verified(&self, id: Uuid) -> DatabaseResult<Option<Restaurant>>;
}
