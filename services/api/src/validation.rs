//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

use crate::models::SchemaError;

/// Validate email
pub fn validate_email(email: &str) -> Result<(), SchemaError> {
    if email.is_empty() {
        return Err(SchemaError::missing("email"));
    }

    if email.len() > 254 {
        return Err(SchemaError::Validation(
            "email must be at most 254 characters long".to_string(),
        ));
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err(SchemaError::Validation("Invalid email format".to_string()));
    }

    Ok(())
}

/// Validate a coordinate pair in degrees
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), SchemaError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(SchemaError::Validation(
            "coords.latitude must be between -90 and 90".to_string(),
        ));
    }

    if !(-180.0..=180.0).contains(&longitude) {
        return Err(SchemaError::Validation(
            "coords.longitude must be between -180 and 180".to_string(),
        ));
    }

    Ok(())
}
