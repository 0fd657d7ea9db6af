//! JWT service for bearer-token validation
//!
//! Tokens are HS256-signed with a shared secret. Issuance lives with the
//! account service; this side only needs to mint tokens in tests and tools.

use anyhow::Result;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::models::{User, UserType};

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared secret for signing and verifying tokens
    pub secret: String,
    /// Token lifetime in seconds (default: 24 hours)
    pub token_expiry: u64,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: Shared signing secret (required)
    /// - `JWT_TOKEN_EXPIRY`: Token expiry in seconds (default: 86400)
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;

        if secret.is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        let token_expiry = std::env::var("JWT_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "86400".to_string()) // 24 hours
            .parse()
            .unwrap_or(86400);

        Ok(JwtConfig {
            secret,
            token_expiry,
        })
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    pub email: String,
    pub user_type: UserType,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: JwtConfig,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        JwtService {
            encoding_key,
            decoding_key,
            validation,
            config,
        }
    }

    /// Generate a token for a user
    pub fn generate_token(&self, user: &User) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| anyhow::anyhow!("Failed to get current time: {}", e))?
            .as_secs();

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            user_type: user.user_type,
            iat: now,
            exp: now + self.config.token_expiry,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate a token and return the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }

    /// Get the token expiry time
    pub fn token_expiry(&self) -> u64 {
        self.config.token_expiry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateUserRequest, NewUser};
    use chrono::Utc;
    use serial_test::serial;

    fn service(secret: &str, token_expiry: u64) -> JwtService {
        JwtService::new(JwtConfig {
            secret: secret.to_string(),
            token_expiry,
        })
    }

    fn user(user_type: &str) -> User {
        NewUser::try_from(CreateUserRequest {
            username: Some("dana".to_string()),
            email: Some("dana@foodl.io".to_string()),
            password: Some("hash".to_string()),
            user_type: Some(user_type.to_string()),
            ..Default::default()
        })
        .unwrap()
        .into_user(Uuid::new_v4(), Utc::now())
    }

    #[test]
    fn token_round_trip_carries_identity_and_role() {
        let jwt = service("test-secret", 900);
        let user = user("Vendor");

        let token = jwt.generate_token(&user).unwrap();
        let claims = jwt.validate_token(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, "dana@foodl.io");
        assert_eq!(claims.user_type, UserType::Vendor);
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let token = service("issuer-secret", 900)
            .generate_token(&user("Client"))
            .unwrap();
        assert!(service("other-secret", 900).validate_token(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let jwt = service("test-secret", 900);
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "dana@foodl.io".to_string(),
            user_type: UserType::Client,
            iat: 1_000,
            exp: 2_000,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(jwt.validate_token(&token).is_err());
    }

    #[test]
    #[serial]
    fn config_requires_a_secret() {
        unsafe {
            std::env::remove_var("JWT_SECRET");
        }
        assert!(JwtConfig::from_env().is_err());

        unsafe {
            std::env::set_var("JWT_SECRET", "s3cret");
            std::env::remove_var("JWT_TOKEN_EXPIRY");
        }
        let config = JwtConfig::from_env().unwrap();
        assert_eq!(config.secret, "s3cret");
        assert_eq!(config.token_expiry, 86400);

        unsafe {
            std::env::remove_var("JWT_SECRET");
        }
    }
}
