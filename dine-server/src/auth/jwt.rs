//! JWT token service
//!
//! Issues and verifies the staff access tokens carried in the `token`
//! query parameter.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Signing secret, at least 32 bytes.
    pub secret: String,
    /// Token lifetime in minutes.
    pub expiration_minutes: i64,
    pub issuer: String,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if secret.len() >= 32 => secret,
            Ok(_) => {
                tracing::warn!("JWT_SECRET shorter than 32 bytes, generating a session key");
                generate_printable_secret()
            }
            Err(_) => {
                tracing::warn!("JWT_SECRET not set, generating a session key");
                generate_printable_secret()
            }
        };

        Self {
            secret,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "dine-server".to_string()),
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Claims stored in the staff token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account subject.
    pub sub: String,
    /// Display name.
    pub name: String,
    /// Expiry timestamp.
    pub exp: i64,
    /// Issued-at timestamp.
    pub iat: i64,
    /// Issuer.
    pub iss: String,
}

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

fn generate_printable_secret() -> String {
    let allowed: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+";
    let mut rng = rand::thread_rng();
    (0..64)
        .map(|_| allowed[rng.gen_range(0..allowed.len())] as char)
        .collect()
}

#[derive(Debug, Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a new staff token for an account.
    pub fn issue(&self, subject: &str, name: &str) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: subject.to_string(),
            name: name.to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Verify and decode a staff token.
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::InvalidToken(format!("Token validation failed: {}", e)),
            }
        })?;

        Ok(token_data.claims)
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new(JwtConfig::default())
    }
}

/// Authenticated staff identity, injected into request extensions by
/// the auth middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub subject: String,
    pub name: String,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            subject: claims.sub,
            name: claims.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> JwtService {
        JwtService::new(JwtConfig {
            secret: "test-secret-test-secret-test-secret!".to_string(),
            expiration_minutes: 60,
            issuer: "dine-server".to_string(),
        })
    }

    #[test]
    fn issue_and_verify_round_trip() {
        let service = test_service();

        let token = service
            .issue("staff:alice", "Alice")
            .expect("Failed to issue token");
        let claims = service.verify(&token).expect("Failed to verify token");

        assert_eq!(claims.sub, "staff:alice");
        assert_eq!(claims.name, "Alice");
        assert_eq!(claims.iss, "dine-server");
    }

    #[test]
    fn wrong_secret_rejected() {
        let service = test_service();
        let other = JwtService::new(JwtConfig {
            secret: "another-secret-another-secret-another!".to_string(),
            expiration_minutes: 60,
            issuer: "dine-server".to_string(),
        });

        let token = service
            .issue("staff:alice", "Alice")
            .expect("Failed to issue token");
        assert!(matches!(
            other.verify(&token),
            Err(JwtError::InvalidSignature)
        ));
    }

    #[test]
    fn garbage_token_rejected() {
        let service = test_service();
        assert!(service.verify("not-a-jwt").is_err());
    }
}
