//! In-memory repositories
//!
//! Each repository keeps its records behind a single async mutex, so every
//! operation, including the email check-then-insert, is atomic.

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{RestaurantStore, USERS_EMAIL_KEY, UserStore};
use crate::models::{NewRestaurant, NewUser, Restaurant, User};

#[derive(Debug, Default)]
struct UserTable {
    rows: HashMap<Uuid, User>,
    by_email: HashMap<String, Uuid>,
}

/// User repository held in process memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    table: Arc<Mutex<UserTable>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> DatabaseResult<User> {
        let mut table = self.table.lock().await;

        if table.by_email.contains_key(&new_user.email) {
            return Err(DatabaseError::UniqueViolation(USERS_EMAIL_KEY.to_string()));
        }

        let user = new_user.into_user(Uuid::new_v4(), Utc::now());
        table.by_email.insert(user.email.clone(), user.id);
        table.rows.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>> {
        let table = self.table.lock().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        let table = self.table.lock().await;
        Ok(table
            .by_email
            .get(email)
            .and_then(|id| table.rows.get(id))
            .cloned())
    }

    async fn set_verification(&self, id: Uuid, verified: bool) -> DatabaseResult<Option<User>> {
        let mut table = self.table.lock().await;
        let Some(user) = table.rows.get_mut(&id) else {
            return Ok(None);
        };

        user.verification = verified;
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }
}

/// Restaurant repository held in process memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryRestaurantRepository {
    // Insertion order doubles as creation order.
    rows: Arc<Mutex<Vec<Restaurant>>>,
}

impl InMemoryRestaurantRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn available_in<'a>(
    rows: &'a [Restaurant],
    code: &'a str,
) -> impl Iterator<Item = &'a Restaurant> {
    rows.iter().filter(move |r| r.code == code && r.is_available)
}

#[async_trait]
impl RestaurantStore for InMemoryRestaurantRepository {
    async fn create(&self, new_restaurant: NewRestaurant) -> DatabaseResult<Restaurant> {
        let restaurant = new_restaurant.into_restaurant(Uuid::new_v4(), Utc::now());
        self.rows.lock().await.push(restaurant.clone());
        Ok(restaurant)
    }

    async fn sample_by_code(&self, code: &str, limit: usize) -> DatabaseResult<Vec<Restaurant>> {
        let rows = self.rows.lock().await;
        let matching: Vec<&Restaurant> = available_in(&rows, code).collect();

        let sample: Vec<Restaurant> = {
            let mut rng = rand::thread_rng();
            matching
                .choose_multiple(&mut rng, limit)
                .map(|r| (*r).clone())
                .collect()
        };

        Ok(sample)
    }

    async fn all_by_code(&self, code: &str) -> DatabaseResult<Vec<Restaurant>> {
        let rows = self.rows.lock().await;
        Ok(available_in(&rows, code).cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Restaurant>> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().find(|r| r.id == id).cloned())
    }

    async fn mark_verified(&self, id: Uuid) -> DatabaseResult<Option<Restaurant>> {
        let mut rows = self.rows.lock().await;
        let Some(restaurant) = rows.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        restaurant.verified = true;
        restaurant.updated_at = Utc::now();
        Ok(Some(restaurant.clone()))
    }
}
