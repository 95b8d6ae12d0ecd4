//! JWT Token Handler
//! Mission: Issue and validate HS256 session tokens
//!
//! A single static shared secret signs every token. There is no rotation and
//! no revocation: a token stays valid until its `exp` passes.

use crate::auth::models::{Claims, User};
use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

/// Secret used when none is configured. Insecure; override with `JWT_SECRET`.
pub const DEFAULT_JWT_SECRET: &str = "mysecretkey";

/// Default token lifetime
pub const DEFAULT_EXPIRATION_HOURS: i64 = 24;

/// Longest token lifetime accepted from configuration (one year)
pub const MAX_EXPIRATION_HOURS: i64 = 24 * 365;

/// JWT Handler for token operations
pub struct JwtHandler {
    secret: String,
    expiration_hours: i64,
}

impl JwtHandler {
    /// Create a new JWT handler with secret key
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            expiration_hours: DEFAULT_EXPIRATION_HOURS,
        }
    }

    pub fn with_expiration_hours(mut self, hours: i64) -> Self {
        self.expiration_hours = hours;
        self
    }

    pub fn expiration_hours(&self) -> i64 {
        self.expiration_hours
    }

    /// Generate a JWT token for a user
    ///
    /// Returns the token and its lifetime in seconds.
    pub fn generate_token(&self, user: &User) -> Result<(String, usize)> {
        let now = Utc::now();
        let lifetime =
            chrono::Duration::try_hours(self.expiration_hours).context("Invalid token lifetime")?;
        let expiration = now
            .checked_add_signed(lifetime)
            .context("Invalid timestamp")?
            .timestamp() as usize;

        let expires_in = self
            .expiration_hours
            .checked_mul(3600)
            .and_then(|secs| usize::try_from(secs).ok())
            .context("Invalid token lifetime")?;

        let claims = Claims {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
            exp: expiration,
            iat: now.timestamp() as usize,
        };

        debug!(
            "Generating JWT for user {} ({}), expires in {}h",
            user.email, user.id, self.expiration_hours
        );

        self.sign(&claims).map(|token| (token, expires_in))
    }

    fn sign(&self, claims: &Claims) -> Result<String> {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to generate JWT")
    }

    /// Validate a JWT token and extract claims
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .context("Invalid or expired token")?;

        debug!("Validated JWT for user {}", decoded.claims.email);

        Ok(decoded.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::UserRole;

    fn create_test_user() -> User {
        User {
            id: 1,
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            password: "p".to_string(),
            role: UserRole::User,
        }
    }

    #[test]
    fn test_jwt_generation_and_validation() {
        let handler = JwtHandler::new("test-secret-key-12345".to_string());
        let user = create_test_user();

        // Generate token
        let (token, expires_in) = handler.generate_token(&user).unwrap();
        assert_eq!(token.split('.').count(), 3);
        assert_eq!(expires_in, 24 * 3600); // 24 hours in seconds

        // Validate token
        let claims = handler.validate_token(&token).unwrap();
        assert_eq!(claims.user_id, user.id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.role, user.role);
        assert!(claims.exp > Utc::now().timestamp() as usize);
    }

    #[test]
    fn test_invalid_token_rejected() {
        let handler = JwtHandler::new("test-secret-key-12345".to_string());

        assert!(handler.validate_token("invalid.token.here").is_err());
        assert!(handler.validate_token("").is_err());
    }

    #[test]
    fn test_different_secrets_reject() {
        let handler1 = JwtHandler::new("secret1".to_string());
        let handler2 = JwtHandler::new("secret2".to_string());
        let user = create_test_user();

        let (token, _) = handler1.generate_token(&user).unwrap();

        assert!(handler2.validate_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let handler = JwtHandler::new("test-secret-key-12345".to_string());
        let now = Utc::now().timestamp() as usize;

        let claims = Claims {
            user_id: 1,
            email: "a@x.com".to_string(),
            role: UserRole::Admin,
            exp: now - 5,
            iat: now - 3600,
        };
        let token = handler.sign(&claims).unwrap();

        assert!(handler.validate_token(&token).is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let handler = JwtHandler::new("test-secret-key-12345".to_string());
        let (token, _) = handler.generate_token(&create_test_user()).unwrap();

        // Swap in a payload claiming the admin role, keep the old signature
        let parts: Vec<&str> = token.split('.').collect();
        let forged_claims = Claims {
            user_id: 1,
            email: "a@x.com".to_string(),
            role: UserRole::Admin,
            exp: Utc::now().timestamp() as usize + 3600,
            iat: Utc::now().timestamp() as usize,
        };
        let forged = handler.sign(&forged_claims).unwrap();
        let forged_payload = forged.split('.').nth(1).unwrap();
        let tampered = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        assert!(handler.validate_token(&tampered).is_err());
    }

    #[test]
    fn test_out_of_range_expiration_is_an_error() {
        let handler = JwtHandler::new("s".to_string()).with_expiration_hours(i64::MAX / 2);

        assert!(handler.generate_token(&create_test_user()).is_err());
    }

    #[test]
    fn test_custom_expiration() {
        let handler = JwtHandler::new("s".to_string()).with_expiration_hours(1);
        let (_, expires_in) = handler.generate_token(&create_test_user()).unwrap();

        assert_eq!(expires_in, 3600);
        assert_eq!(handler.expiration_hours(), 1);
    }
}
