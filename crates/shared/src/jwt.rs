//! JWT token utilities using RS256 algorithm.
//!
//! The host platform authenticates students and course staff, then hands the
//! browser a signed token describing who is interacting with the evaluation
//! block. This module validates those tokens (and can mint them, which the
//! test suites and local development rely on).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error type for JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingError(String),

    #[error("Failed to decode token: {0}")]
    DecodingError(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// JWT token claims carried by a host-issued identity token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (student or staff user ID)
    pub sub: String,
    /// Platform username
    pub username: String,
    /// First name (may be blank)
    #[serde(default)]
    pub first_name: String,
    /// Last name (may be blank)
    #[serde(default)]
    pub last_name: String,
    /// Account email address
    pub email: String,
    /// Course the token is scoped to
    pub course_id: String,
    /// Whether the bearer is course staff (author mode)
    #[serde(default)]
    pub staff: bool,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// JWT ID (unique token identifier)
    pub jti: String,
}

/// Identity profile to embed when minting a token.
#[derive(Debug, Clone)]
pub struct TokenProfile {
    pub user_id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub course_id: String,
    pub staff: bool,
}

/// Default leeway in seconds for clock skew tolerance
pub const DEFAULT_LEEWAY_SECS: u64 = 30;

/// Configuration for JWT token generation and validation.
#[derive(Clone)]
pub struct JwtConfig {
    /// RSA private key for signing tokens; absent in verify-only deployments
    encoding_key: Option<EncodingKey>,
    /// RSA public key for validating tokens
    decoding_key: DecodingKey,
    /// Token expiration in seconds
    pub token_expiry_secs: i64,
    /// Leeway in seconds for clock skew tolerance
    pub leeway_secs: u64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("token_expiry_secs", &self.token_expiry_secs)
            .field("leeway_secs", &self.leeway_secs)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl JwtConfig {
    /// Creates a new JwtConfig from an RSA key pair in PEM format.
    pub fn new(
        private_key_pem: &str,
        public_key_pem: &str,
        token_expiry_secs: i64,
    ) -> Result<Self, JwtError> {
        Self::with_leeway(
            private_key_pem,
            public_key_pem,
            token_expiry_secs,
            DEFAULT_LEEWAY_SECS,
        )
    }

    /// Creates a new JwtConfig with custom clock-skew leeway.
    pub fn with_leeway(
        private_key_pem: &str,
        public_key_pem: &str,
        token_expiry_secs: i64,
        leeway_secs: u64,
    ) -> Result<Self, JwtError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
            .map_err(|e| JwtError::InvalidKey(format!("Invalid private key: {}", e)))?;

        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(|e| JwtError::InvalidKey(format!("Invalid public key: {}", e)))?;

        Ok(Self {
            encoding_key: Some(encoding_key),
            decoding_key,
            token_expiry_secs,
            leeway_secs,
        })
    }

    /// Creates a verify-only JwtConfig from the host's public key.
    ///
    /// This is what the running service uses: tokens are minted by the host
    /// platform, never by this backend.
    pub fn verify_only(public_key_pem: &str, leeway_secs: u64) -> Result<Self, JwtError> {
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(|e| JwtError::InvalidKey(format!("Invalid public key: {}", e)))?;

        Ok(Self {
            encoding_key: None,
            decoding_key,
            token_expiry_secs: 0,
            leeway_secs,
        })
    }

    /// Creates a JwtConfig for testing with an HS256 symmetric key.
    /// DO NOT use in production - only for tests.
    #[cfg(test)]
    pub fn new_for_testing(secret: &str) -> Self {
        Self {
            encoding_key: Some(EncodingKey::from_secret(secret.as_bytes())),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_expiry_secs: 900,
            leeway_secs: 0, // Strict for testing - no leeway
        }
    }

    /// Mints a token for the given identity profile.
    ///
    /// Returns the encoded token and its `jti`.
    pub fn generate_token(&self, profile: &TokenProfile) -> Result<(String, String), JwtError> {
        let encoding_key = self
            .encoding_key
            .as_ref()
            .ok_or_else(|| JwtError::InvalidKey("No private key configured".to_string()))?;

        let now = Utc::now();
        let jti = Uuid::new_v4().to_string();
        let exp = (now + Duration::seconds(self.token_expiry_secs)).timestamp();

        let claims = Claims {
            sub: profile.user_id.to_string(),
            username: profile.username.clone(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            email: profile.email.clone(),
            course_id: profile.course_id.clone(),
            staff: profile.staff,
            exp,
            iat: now.timestamp(),
            jti: jti.clone(),
        };

        let header = Header::new(self.algorithm());

        let token = encode(&header, &claims, encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))?;

        Ok((token, jti))
    }

    /// Validates a token and returns its claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm());
        validation.validate_exp = true;
        validation.leeway = self.leeway_secs;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidToken,
                _ => JwtError::DecodingError(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Returns the algorithm used by this config.
    /// Tests use HS256, production uses RS256.
    fn algorithm(&self) -> Algorithm {
        #[cfg(test)]
        {
            Algorithm::HS256
        }
        #[cfg(not(test))]
        {
            Algorithm::RS256
        }
    }
}

/// Extracts the user ID from validated claims.
pub fn extract_user_id(claims: &Claims) -> Result<Uuid, JwtError> {
    Uuid::parse_str(&claims.sub).map_err(|_| JwtError::InvalidToken)
}
