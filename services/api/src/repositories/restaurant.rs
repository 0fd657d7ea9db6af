//! Restaurant repository for database operations

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use super::RestaurantStore;
use crate::models::{Coords, NewRestaurant, Restaurant};

const RESTAURANT_COLUMNS: &str = "id, title, time, image_url, logo_url, owner_id, code, pickup, \
     delivery, is_available, rating, rating_count, verified, latitude, longitude, address, \
     coords_title, created_at, updated_at";

/// PostgreSQL-backed restaurant repository
#[derive(Clone)]
pub struct PgRestaurantRepository {
    pool: PgPool,
}

impl PgRestaurantRepository {
    /// Create a new restaurant repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn restaurant_from_row(row: &PgRow) -> DatabaseResult<Restaurant> {
    Ok(Restaurant {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        time: row.try_get("time")?,
        image_url: row.try_get("image_url")?,
        logo_url: row.try_get("logo_url")?,
        owner: row.try_get("owner_id")?,
        code: row.try_get("code")?,
        pickup: row.try_get("pickup")?,
        delivery: row.try_get("delivery")?,
        is_available: row.try_get("is_available")?,
        rating: row.try_get("rating")?,
        rating_count: row.try_get("rating_count")?,
        verified: row.try_get("verified")?,
        coords: Coords {
            latitude: row.try_get("latitude")?,
            longitude: row.try_get("longitude")?,
            address: row.try_get("address")?,
            title: row.try_get("coords_title")?,
        },
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl RestaurantStore for PgRestaurantRepository {
    async fn create(&self, new_restaurant: NewRestaurant) -> DatabaseResult<Restaurant> {
        info!(
            "Creating restaurant {} in region {}",
            new_restaurant.title, new_restaurant.code
        );

        let query = format!(
            r#"
            INSERT INTO restaurants (id, title, time, image_url, logo_url, owner_id, code,
                                     pickup, delivery, is_available, latitude, longitude,
                                     address, coords_title, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $15)
            RETURNING {RESTAURANT_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(Uuid::new_v4())
            .bind(&new_restaurant.title)
            .bind(&new_restaurant.time)
            .bind(&new_restaurant.image_url)
            .bind(&new_restaurant.logo_url)
            .bind(new_restaurant.owner)
            .bind(&new_restaurant.code)
            .bind(new_restaurant.pickup)
            .bind(new_restaurant.delivery)
            .bind(new_restaurant.is_available)
            .bind(new_restaurant.coords.latitude)
            .bind(new_restaurant.coords.longitude)
            .bind(&new_restaurant.coords.address)
            .bind(&new_restaurant.coords.title)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from_query)?;

        restaurant_from_row(&row)
    }

    async fn sample_by_code(&self, code: &str, limit: usize) -> DatabaseResult<Vec<Restaurant>> {
        let query = format!(
            r#"
            SELECT {RESTAURANT_COLUMNS}
            FROM restaurants
            WHERE code = $1 AND is_available
            ORDER BY random()
            LIMIT $2
            "#
        );

        let rows = sqlx::query(&query)
            .bind(code)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from_query)?;

        rows.iter().map(restaurant_from_row).collect()
    }

    async fn all_by_code(&self, code: &str) -> DatabaseResult<Vec<Restaurant>> {
        let query = format!(
            r#"
            SELECT {RESTAURANT_COLUMNS}
            FROM restaurants
            WHERE code = $1 AND is_available
            ORDER BY created_at ASC
            "#
        );

        let rows = sqlx::query(&query)
            .bind(code)
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from_query)?;

        rows.iter().map(restaurant_from_row).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Restaurant>> {
        let query = format!("SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from_query)?;

        row.as_ref().map(restaurant_from_row).transpose()
    }

    async fn mark_verified(&self, id: Uuid) -> DatabaseResult<Option<Restaurant>> {
        info!("Verifying restaurant {}", id);

        let query = format!(
            r#"
            UPDATE restaurants
            SET verified = TRUE, updated_at = NOW()
            WHERE id = $1
            RETURNING {RESTAURANT_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from_query)?;

        row.as_ref().map(restaurant_from_row).transpose()
    }
}
