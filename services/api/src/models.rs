//! API models for request and response payloads

use thiserror::Error;

pub mod restaurant;
pub mod user;

pub use restaurant::{Coords, CreateRestaurantRequest, NewRestaurant, Restaurant};
pub use user::{CreateUserRequest, NewUser, User, UserType};

/// Failures raised while turning a request payload into a storable record
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// A required field is missing or malformed
    #[error("{0}")]
    Validation(String),

    /// A value outside a closed enumeration
    #[error("`{value}` is not a valid value for {field}")]
    EnumViolation { field: &'static str, value: String },
}

impl SchemaError {
    pub(crate) fn missing(field: &str) -> Self {
        SchemaError::Validation(format!("{} is required", field))
    }
}

/// A required text field, kept as given. Whitespace-only counts as missing.
pub(crate) fn required_text(value: Option<String>, field: &str) -> Result<String, SchemaError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(SchemaError::missing(field)),
    }
}
