//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims structure for the JWT payload.
///
/// Fixed, strongly-typed claim set; there is no free-form claim bag so that
/// signature verification and tests stay exact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,
}

impl Claims {
    /// Creates new claims for an access token.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's UUID
    /// * `issuer` - Issuer claim value
    /// * `audience` - Audience claim value
    /// * `ttl_seconds` - Access token lifetime in seconds
    pub fn new_access_token(user_id: Uuid, issuer: &str, audience: &str, ttl_seconds: i64) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(ttl_seconds);

        Self {
            sub: user_id.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.exp
    }

    /// Checks if the claims are valid (not expired and after nbf)
    pub fn is_valid(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.nbf && now < self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Refresh token record as persisted by the token store.
///
/// The store holds at most one record per user; saving a new record
/// supersedes the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Unique identifier for the refresh token record
    pub id: Uuid,

    /// User ID this token belongs to
    pub user_id: Uuid,

    /// SHA-256 hex digest of the secret; the raw value is never persisted
    pub token_hash: String,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Creates a new refresh token record
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's UUID
    /// * `token_hash` - The hashed secret value
    /// * `ttl_seconds` - Refresh token lifetime in seconds
    pub fn new(user_id: Uuid, token_hash: String, ttl_seconds: i64) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            created_at: now,
            expires_at: now + Duration::seconds(ttl_seconds),
        }
    }

    /// Checks if the refresh token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Gets the time remaining until expiration, or zero if expired
    pub fn time_until_expiration(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

/// Token pair returned to the client; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed JWT access token
    pub access_token: String,

    /// Opaque refresh token secret
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_claims() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new_access_token(user_id, "authgate", "authgate-api", 900);

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.iss, "authgate");
        assert_eq!(claims.aud, "authgate-api");
        assert_eq!(claims.exp - claims.iat, 900);
        assert!(claims.is_valid());
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_claims_user_id_parsing() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new_access_token(user_id, "authgate", "authgate-api", 900);

        let parsed_id = claims.user_id().unwrap();
        assert_eq!(parsed_id, user_id);
    }

    #[test]
    fn test_claims_expiration() {
        let user_id = Uuid::new_v4();
        let mut claims = Claims::new_access_token(user_id, "authgate", "authgate-api", 900);

        // Set expiration to past
        claims.exp = Utc::now().timestamp() - 1;

        assert!(claims.is_expired());
        assert!(!claims.is_valid());
    }

    #[test]
    fn test_claims_jti_uniqueness() {
        let user_id = Uuid::new_v4();
        let a = Claims::new_access_token(user_id, "authgate", "authgate-api", 900);
        let b = Claims::new_access_token(user_id, "authgate", "authgate-api", 900);

        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_refresh_token_creation() {
        let user_id = Uuid::new_v4();
        let token = RefreshToken::new(user_id, "hashed_token_value".to_string(), 604800);

        assert_eq!(token.user_id, user_id);
        assert_eq!(token.token_hash, "hashed_token_value");
        assert!(!token.is_expired());
    }

    #[test]
    fn test_refresh_token_expiration() {
        let user_id = Uuid::new_v4();
        let mut token = RefreshToken::new(user_id, "hash".to_string(), 604800);

        // Manually set expiration to past
        token.expires_at = Utc::now() - Duration::days(1);

        assert!(token.is_expired());
        assert_eq!(token.time_until_expiration(), Duration::zero());
    }

    #[test]
    fn test_refresh_token_time_until_expiration() {
        let user_id = Uuid::new_v4();
        let token = RefreshToken::new(user_id, "hash".to_string(), 604800);

        let time_remaining = token.time_until_expiration();
        assert!(time_remaining <= Duration::seconds(604800));
        assert!(time_remaining > Duration::seconds(604700));
    }

    #[test]
    fn test_token_pair_serialization() {
        let pair = TokenPair::new("access".to_string(), "refresh".to_string(), 900);

        let json = serde_json::to_string(&pair).unwrap();
        let deserialized: TokenPair = serde_json::from_str(&json).unwrap();

        assert_eq!(pair, deserialized);
    }

    #[test]
    fn test_claims_serialization() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new_access_token(user_id, "authgate", "authgate-api", 900);

        let json = serde_json::to_string(&claims).unwrap();
        let deserialized: Claims = serde_json::from_str(&json).unwrap();

        assert_eq!(claims, deserialized);
    }
}
