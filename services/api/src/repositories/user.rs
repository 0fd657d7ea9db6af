//! User repository for database operations

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use super::UserStore;
use crate::models::{NewUser, User, UserType};

const USER_COLUMNS: &str = "id, username, email, otp, fcm, password, verification, phone, \
     phone_verification, address_id, user_type, profile, created_at, updated_at";

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &PgRow) -> DatabaseResult<User> {
    let user_type: String = row.try_get("user_type")?;
    let user_type = user_type
        .parse::<UserType>()
        .map_err(|e| DatabaseError::Query(sqlx::Error::Decode(Box::new(e))))?;

    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        otp: row.try_get("otp")?,
        fcm: row.try_get("fcm")?,
        password: row.try_get("password")?,
        verification: row.try_get("verification")?,
        phone: row.try_get("phone")?,
        phone_verification: row.try_get("phone_verification")?,
        address: row.try_get("address_id")?,
        user_type,
        profile: row.try_get("profile")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl UserStore for PgUserRepository {
    async fn create(&self, new_user: NewUser) -> DatabaseResult<User> {
        info!("Creating new user: {}", new_user.username);

        let now = Utc::now();
        let query = format!(
            r#"
            INSERT INTO users (id, username, email, otp, fcm, password, verification, phone,
                               phone_verification, address_id, user_type, profile,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13)
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(Uuid::new_v4())
            .bind(&new_user.username)
            .bind(&new_user.email)
            .bind(&new_user.otp)
            .bind(&new_user.fcm)
            .bind(&new_user.password)
            .bind(new_user.verification)
            .bind(&new_user.phone)
            .bind(new_user.phone_verification)
            .bind(new_user.address)
            .bind(new_user.user_type.as_str())
            .bind(&new_user.profile)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from_query)?;

        user_from_row(&row)
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>> {
        info!("Finding user by ID: {}", id);

        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from_query)?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        info!("Finding user by email: {}", email);

        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from_query)?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn set_verification(&self, id: Uuid, verified: bool) -> DatabaseResult<Option<User>> {
        info!("Setting verification for user {} to {}", id, verified);

        let query = format!(
            r#"
            UPDATE users
            SET verification = $2, updated_at = $3
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(id)
            .bind(verified)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from_query)?;

        row.as_ref().map(user_from_row).transpose()
    }
}
