use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;

use crate::errors::AuthError;
use crate::types::internal::auth::Claims;

/// Manages JWT generation and validation
pub struct TokenService {
    jwt_secret: String,
    jwt_expiration_hours: i64,
}

impl TokenService {
    pub fn new(jwt_secret: String) -> Self {
        Self {
            jwt_secret,
            jwt_expiration_hours: 8,
        }
    }

    /// Generate an HS256 JWT for the given user
    pub fn generate_jwt(&self, user_id: i32, email: &str, admin: bool) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let expiration = now + self.jwt_expiration_hours * 3600;

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            admin,
            exp: expiration,
            iat: now,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::internal_error(format!("Failed to generate JWT: {}", e)))
    }

    /// Validate a JWT and return the claims
    pub fn validate_jwt(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            if e.to_string().contains("ExpiredSignature") {
                AuthError::expired_token()
            } else {
                AuthError::invalid_token()
            }
        })?;

        Ok(token_data.claims)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret-key-minimum-32-characters-long".to_string())
    }

    #[test]
    fn generated_jwt_roundtrips_with_claims() {
        let service = service();
        let token = service.generate_jwt(7, "ana@example.com", false).unwrap();
        let claims = service.validate_jwt(&token).unwrap();

        assert_eq!(claims.sub, "7");
        assert_eq!(claims.email, "ana@example.com");
        assert!(!claims.admin);
        assert_eq!(claims.exp - claims.iat, 8 * 3600);
    }

    #[test]
    fn admin_flag_is_carried_in_claims() {
        let service = service();
        let token = service.generate_jwt(1, "admin@example.com", true).unwrap();
        let claims = service.validate_jwt(&token).unwrap();
        assert!(claims.admin);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let service = service();
        let token = service.generate_jwt(7, "ana@example.com", false).unwrap();
        let tampered = format!("{}x", token);
        match service.validate_jwt(&tampered) {
            Err(AuthError::InvalidToken(_)) => {}
            other => panic!("expected InvalidToken, got {:?}", other),
        }
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let service = service();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "7".to_string(),
            email: "ana@example.com".to_string(),
            admin: false,
            exp: now - 3600,
            iat: now - 7200,
        };
        let expired = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret("test-secret-key-minimum-32-characters-long".as_bytes()),
        )
        .unwrap();

        match service.validate_jwt(&expired) {
            Err(AuthError::ExpiredToken(_)) => {}
            other => panic!("expected ExpiredToken, got {:?}", other),
        }
    }
}
