//! User model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use super::{SchemaError, required_text};
use crate::validation::validate_email;

/// Sentinel stored in `otp` and `fcm` when nothing was issued
pub const NONE_SENTINEL: &str = "none";
/// Placeholder stored in `phone` when no number was provided
pub const PHONE_PLACEHOLDER: &str = "0123456789";
/// Image shown for users without a profile picture
pub const DEFAULT_PROFILE_URL: &str = "https://foodl.s3.eu-north-1.amazonaws.com/profile.png";

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UserType {
    #[default]
    Client,
    Admin,
    Vendor,
    Driver,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Client => "Client",
            UserType::Admin => "Admin",
            UserType::Vendor => "Vendor",
            UserType::Driver => "Driver",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Client" => Ok(UserType::Client),
            "Admin" => Ok(UserType::Admin),
            "Vendor" => Ok(UserType::Vendor),
            "Driver" => Ok(UserType::Driver),
            other => Err(SchemaError::EnumViolation {
                field: "userType",
                value: other.to_string(),
            }),
        }
    }
}

/// User entity
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub otp: String,
    pub fcm: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub verification: bool,
    pub phone: String,
    pub phone_verification: bool,
    pub address: Option<Uuid>,
    pub user_type: UserType,
    pub profile: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The issued one-time password, if any
    pub fn otp_code(&self) -> Option<&str> {
        real_value(&self.otp, NONE_SENTINEL)
    }

    /// The push-notification device token, if any
    pub fn fcm_token(&self) -> Option<&str> {
        real_value(&self.fcm, NONE_SENTINEL)
    }

    /// The phone number, if the user gave one
    pub fn phone_number(&self) -> Option<&str> {
        real_value(&self.phone, PHONE_PLACEHOLDER)
    }
}

fn real_value<'a>(value: &'a str, sentinel: &str) -> Option<&'a str> {
    if value == sentinel { None } else { Some(value) }
}

/// Registration payload as received on the wire
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub otp: Option<String>,
    pub fcm: Option<String>,
    pub verification: Option<bool>,
    pub phone: Option<String>,
    pub phone_verification: Option<bool>,
    pub address: Option<Uuid>,
    pub user_type: Option<String>,
    pub profile: Option<String>,
}

/// Validated user ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub otp: String,
    pub fcm: String,
    pub password: String,
    pub verification: bool,
    pub phone: String,
    pub phone_verification: bool,
    pub address: Option<Uuid>,
    pub user_type: UserType,
    pub profile: String,
}

impl NewUser {
    /// Materialize the record the store will hold
    pub fn into_user(self, id: Uuid, now: DateTime<Utc>) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            otp: self.otp,
            fcm: self.fcm,
            password: self.password,
            verification: self.verification,
            phone: self.phone,
            phone_verification: self.phone_verification,
            address: self.address,
            user_type: self.user_type,
            profile: self.profile,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = SchemaError;

    fn try_from(req: CreateUserRequest) -> Result<Self, Self::Error> {
        let username = required_text(req.username, "username")?;
        let email = required_text(req.email, "email")?;
        validate_email(&email)?;

        // Stored verbatim; the credential arrives already hashed.
        let password = match req.password {
            Some(p) if !p.is_empty() => p,
            _ => return Err(SchemaError::missing("password")),
        };

        let user_type = match req.user_type {
            Some(raw) => raw.parse()?,
            None => UserType::default(),
        };

        Ok(NewUser {
            username,
            email,
            otp: req.otp.unwrap_or_else(|| NONE_SENTINEL.to_string()),
            fcm: req.fcm.unwrap_or_else(|| NONE_SENTINEL.to_string()),
            password,
            verification: req.verification.unwrap_or(false),
            phone: req.phone.unwrap_or_else(|| PHONE_PLACEHOLDER.to_string()),
            phone_verification: req.phone_verification.unwrap_or(false),
            address: req.address,
            user_type,
            profile: req
                .profile
                .unwrap_or_else(|| DEFAULT_PROFILE_URL.to_string()),
        })
    }
}
