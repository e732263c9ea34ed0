//! Student identity extractor.
//!
//! Validates the host-issued Bearer token in the Authorization header and
//! provides the identity of the person interacting with the block. Course
//! staff carry a `staff` claim and interact in author mode.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::app::AppState;
use crate::config::JwtAuthConfig;
use crate::error::ApiError;
use domain::models::StudentIdentity;
use shared::jwt::{extract_user_id, JwtConfig};

/// Authenticated identity from the host-issued JWT.
#[derive(Debug, Clone)]
pub struct StudentAuth {
    pub user_id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub course_id: String,
    pub staff: bool,
}

impl StudentAuth {
    /// The domain-level identity of this caller.
    pub fn identity(&self) -> StudentIdentity {
        StudentIdentity {
            user_id: self.user_id,
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            course_id: self.course_id.clone(),
            staff: self.staff,
        }
    }

    /// Builds a verify-only JwtConfig from the service configuration.
    pub fn create_jwt_config(config: &JwtAuthConfig) -> Result<JwtConfig, String> {
        JwtConfig::verify_only(&config.public_key, config.leeway_secs)
            .map_err(|e| format!("Failed to initialize JWT config: {}", e))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for StudentAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        if !auth_header.starts_with("Bearer ") {
            return Err(ApiError::Unauthorized(
                "Invalid Authorization header format".to_string(),
            ));
        }

        let token = &auth_header[7..];

        let jwt_config =
            Self::create_jwt_config(&state.config.jwt).map_err(ApiError::Internal)?;

        let claims = jwt_config
            .validate_token(token)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

        let user_id = extract_user_id(&claims)
            .map_err(|_| ApiError::Unauthorized("Invalid user ID in token".to_string()))?;

        Ok(StudentAuth {
            user_id,
            username: claims.username,
            first_name: claims.first_name,
            last_name: claims.last_name,
            email: claims.email,
            course_id: claims.course_id,
            staff: claims.staff,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_auth() -> StudentAuth {
        StudentAuth {
            user_id: Uuid::new_v4(),
            username: "astudent".to_string(),
            first_name: "Ann".to_string(),
            last_name: "Smith".to_string(),
            email: "ann@example.com".to_string(),
            course_id: "course-1".to_string(),
            staff: false,
        }
    }

    #[test]
    fn test_identity_copies_claims() {
        let auth = test_auth();
        let identity = auth.identity();
        assert_eq!(identity.user_id, auth.user_id);
        assert_eq!(identity.username, "astudent");
        assert_eq!(identity.email, "ann@example.com");
        assert!(!identity.staff);
    }

    #[test]
    fn test_identity_label() {
        let auth = test_auth();
        assert_eq!(auth.identity().invitation_label(), "Ann Smith (ann@example.com)");
    }

    #[test]
    fn test_create_jwt_config_rejects_bad_key() {
        let config = JwtAuthConfig {
            private_key: String::new(),
            public_key: "not-a-pem".to_string(),
            token_expiry_secs: 3600,
            leeway_secs: 30,
        };
        assert!(StudentAuth::create_jwt_config(&config).is_err());
    }
}
