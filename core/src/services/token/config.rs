//! Configuration for the token service

use ag_shared::config::JwtConfig;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret (HS256)
    pub jwt_secret: String,
    /// Issuer claim embedded in access tokens
    pub issuer: String,
    /// Audience claim embedded in access tokens
    pub audience: String,
    /// Access token expiry in seconds
    pub access_token_expiry_seconds: i64,
    /// Refresh token expiry in seconds
    pub refresh_token_expiry_seconds: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            issuer: "authgate".to_string(),
            audience: "authgate-api".to_string(),
            access_token_expiry_seconds: 900,     // 15 minutes
            refresh_token_expiry_seconds: 604800, // 7 days
        }
    }
}

impl TokenServiceConfig {
    /// Build from the shared JWT configuration loaded at startup
    pub fn from_jwt_config(jwt: &JwtConfig) -> Self {
        Self {
            jwt_secret: jwt.secret.clone(),
            issuer: jwt.issuer.clone(),
            audience: jwt.audience.clone(),
            access_token_expiry_seconds: jwt.access_token_expiry,
            refresh_token_expiry_seconds: jwt.refresh_token_expiry,
        }
    }
}
