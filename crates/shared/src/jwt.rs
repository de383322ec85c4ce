//! JWT session token generation and validation.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use crate::auth::{Claims, Role};

/// JWT configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Token expiration in hours from issuance.
    pub token_expires_hours: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            token_expires_hours: 24,
        }
    }
}

/// Errors that can occur during JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Token encoding failed.
    #[error("failed to encode token: {0}")]
    EncodingError(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,

    /// Token is malformed or carries an invalid signature.
    #[error("invalid token")]
    Invalid,
}

/// JWT service for token operations.
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("config", &self.config)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Creates a new JWT service with the given configuration.
    #[must_use]
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Generates a session token for a user.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if token generation fails.
    pub fn generate_token(
        &self,
        user_id: &str,
        username: &str,
        role: Role,
        member_id: Option<String>,
    ) -> Result<String, JwtError> {
        let expires_at = Utc::now() + Duration::hours(self.config.token_expires_hours);
        let claims = Claims::new(user_id, username, role, member_id, expires_at);
        self.encode_claims(&claims)
    }

    /// Signs an explicit claims payload.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if token generation fails.
    pub fn encode_claims(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Validates and decodes a token.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Expired` if the token has expired.
    /// Returns `JwtError::Invalid` if the token is malformed or the
    /// signature does not verify.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let validation = Validation::default();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Invalid,
            })
    }

    /// Returns the configured token lifetime in hours.
    #[must_use]
    pub const fn token_expires_hours(&self) -> i64 {
        self.config.token_expires_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> JwtService {
        JwtService::new(JwtConfig {
            secret: "test-secret-key-for-testing".to_string(),
            token_expires_hours: 24,
        })
    }

    #[test]
    fn test_generate_and_validate_token() {
        let service = create_test_service();
        let token = service
            .generate_token("user-1", "admin", Role::Admin, None)
            .unwrap();

        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.user_id(), "user-1");
        assert_eq!(claims.username, "admin");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.member_id, None);
    }

    #[test]
    fn test_member_link_survives_roundtrip() {
        let service = create_test_service();
        let token = service
            .generate_token("user-2", "henrik", Role::Spiess, Some("member-7".into()))
            .unwrap();

        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.member_id.as_deref(), Some("member-7"));
    }

    #[test]
    fn test_token_valid_before_expiry() {
        // Simulates verifying at hour 23 of a 24-hour token: one hour
        // of lifetime left.
        let service = create_test_service();
        let claims = Claims::new(
            "user-1",
            "admin",
            Role::Admin,
            None,
            Utc::now() + Duration::hours(1),
        );
        let token = service.encode_claims(&claims).unwrap();
        assert!(service.validate_token(&token).is_ok());
    }

    #[test]
    fn test_token_expired() {
        // Simulates verifying at hour 25 of a 24-hour token.
        let service = create_test_service();
        let claims = Claims::new(
            "user-1",
            "admin",
            Role::Admin,
            None,
            Utc::now() - Duration::hours(1),
        );
        let token = service.encode_claims(&claims).unwrap();
        assert!(matches!(
            service.validate_token(&token),
            Err(JwtError::Expired)
        ));
    }

    #[test]
    fn test_invalid_token() {
        let service = create_test_service();
        assert!(matches!(
            service.validate_token("invalid.token.here"),
            Err(JwtError::Invalid)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = create_test_service();
        let token = service
            .generate_token("user-1", "admin", Role::Admin, None)
            .unwrap();

        let other = JwtService::new(JwtConfig {
            secret: "a-different-secret".to_string(),
            token_expires_hours: 24,
        });
        assert!(matches!(
            other.validate_token(&token),
            Err(JwtError::Invalid)
        ));
    }
}
