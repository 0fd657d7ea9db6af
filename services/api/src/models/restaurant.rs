//! Restaurant model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{SchemaError, required_text};
use crate::validation::validate_coordinates;

/// Rating a restaurant starts with before any reviews
pub const DEFAULT_RATING: f64 = 3.0;

/// Location pin of a restaurant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub title: String,
}

/// Restaurant entity
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: Uuid,
    pub title: String,
    pub time: String,
    pub image_url: String,
    pub logo_url: String,
    pub owner: Uuid,
    pub code: String,
    pub pickup: bool,
    pub delivery: bool,
    pub is_available: bool,
    pub rating: f64,
    pub rating_count: i32,
    pub verified: bool,
    pub coords: Coords,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Coordinates as received on the wire; every field is required
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoordsRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
    pub title: Option<String>,
}

/// Restaurant creation payload as received on the wire
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurantRequest {
    pub title: Option<String>,
    pub time: Option<String>,
    pub image_url: Option<String>,
    pub logo_url: Option<String>,
    pub owner: Option<Uuid>,
    pub code: Option<String>,
    pub pickup: Option<bool>,
    pub delivery: Option<bool>,
    pub is_available: Option<bool>,
    pub coords: Option<CoordsRequest>,
}

/// Validated restaurant ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewRestaurant {
    pub title: String,
    pub time: String,
    pub image_url: String,
    pub logo_url: String,
    pub owner: Uuid,
    pub code: String,
    pub pickup: bool,
    pub delivery: bool,
    pub is_available: bool,
    pub coords: Coords,
}

impl CreateRestaurantRequest {
    /// Validate the payload for a restaurant owned by `owner`
    pub fn validate(self, owner: Uuid) -> Result<NewRestaurant, SchemaError> {
        let title = required_text(self.title, "title")?;
        let time = required_text(self.time, "time")?;
        let image_url = required_text(self.image_url, "imageUrl")?;
        let logo_url = required_text(self.logo_url, "logoUrl")?;
        let code = required_text(self.code, "code")?;

        let coords = self.coords.ok_or_else(|| SchemaError::missing("coords"))?;
        let latitude = coords
            .latitude
            .ok_or_else(|| SchemaError::missing("coords.latitude"))?;
        let longitude = coords
            .longitude
            .ok_or_else(|| SchemaError::missing("coords.longitude"))?;
        validate_coordinates(latitude, longitude)?;

        Ok(NewRestaurant {
            title,
            time,
            image_url,
            logo_url,
            owner,
            code,
            pickup: self.pickup.unwrap_or(true),
            delivery: self.delivery.unwrap_or(true),
            is_available: self.is_available.unwrap_or(true),
            coords: Coords {
                latitude,
                longitude,
                address: required_text(coords.address, "coords.address")?,
                title: required_text(coords.title, "coords.title")?,
            },
        })
    }
}

impl NewRestaurant {
    /// Materialize the record the store will hold
    pub fn into_restaurant(self, id: Uuid, now: DateTime<Utc>) -> Restaurant {
        Restaurant {
            id,
            title: self.title,
            time: self.time,
            image_url: self.image_url,
            logo_url: self.logo_url,
            owner: self.owner,
            code: self.code,
            pickup: self.pickup,
            delivery: self.delivery,
            is_available: self.is_available,
            rating: DEFAULT_RATING,
            rating_count: 0,
            verified: false,
            coords: self.coords,
            created_at: now,
            updated_at: now,
        }
    }
}
