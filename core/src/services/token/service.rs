//! Main token service implementation

use constant_time_eq::constant_time_eq;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::token::{Claims, RefreshToken, TokenPair};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::TokenRepository;

use super::config::TokenServiceConfig;

/// Minimum signing key length in bytes; anything shorter is a deployment
/// mistake, not a per-request condition.
const MIN_SECRET_BYTES: usize = 32;

/// Length of generated refresh secrets (alphanumeric chars, ~190 bits)
const REFRESH_SECRET_LEN: usize = 32;

/// Outcome of checking a presented refresh secret against the owner's
/// current record. Lookup misses and mismatches are errors, not statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTokenStatus {
    /// The record matches and is still within its validity window
    Valid,
    /// The record matches but has aged out; rotation is due
    Expired,
}

/// Service for issuing JWT access tokens and managing refresh tokens
pub struct TokenService<R: TokenRepository> {
    repository: Arc<R>,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<R: TokenRepository> TokenService<R> {
    /// Creates a new token service instance.
    ///
    /// # Arguments
    ///
    /// * `repository` - Refresh token store
    /// * `config` - Token service configuration
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if the signing key is missing or
    /// shorter than 32 bytes. Callers must treat this as fatal at startup.
    pub fn new(repository: Arc<R>, config: TokenServiceConfig) -> Result<Self, DomainError> {
        if config.jwt_secret.len() < MIN_SECRET_BYTES {
            return Err(DomainError::Configuration {
                message: format!(
                    "JWT signing key must be at least {} bytes, got {}",
                    MIN_SECRET_BYTES,
                    config.jwt_secret.len()
                ),
            });
        }

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Ok(Self {
            repository,
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Issues a signed access token for a user.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The encoded JWT
    /// * `Err(TokenError::TokenGenerationFailed)` - Signing failed
    pub fn issue_access_token(&self, user_id: Uuid) -> DomainResult<String> {
        let claims = Claims::new_access_token(
            user_id,
            &self.config.issuer,
            &self.config.audience,
            self.config.access_token_expiry_seconds,
        );
        self.encode_jwt(&claims)
    }

    /// Generates a fresh refresh secret for a user and stores its hash,
    /// superseding any record the user already has.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The raw secret; the only copy, never persisted
    pub async fn issue_refresh_token(&self, user_id: Uuid) -> DomainResult<String> {
        let secret = Self::generate_refresh_secret();
        let token_hash = Self::hash_token(&secret);

        let record = RefreshToken::new(
            user_id,
            token_hash,
            self.config.refresh_token_expiry_seconds,
        );
        self.repository.save_refresh_token(record).await?;

        Ok(secret)
    }

    /// Issues a new access/refresh token pair for a user.
    ///
    /// Saving the refresh record supersedes any previous one, so every call
    /// leaves the user with exactly one live refresh token.
    pub async fn issue_pair(&self, user_id: Uuid) -> DomainResult<TokenPair> {
        let access_token = self.issue_access_token(user_id)?;
        let refresh_token = self.issue_refresh_token(user_id).await?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_expiry_seconds,
        ))
    }

    /// Resolves which user a presented refresh secret belongs to.
    ///
    /// # Returns
    ///
    /// * `Ok(RefreshToken)` - The record whose hash matches the secret
    /// * `Err(TokenError::InvalidToken)` - The secret is unknown to the store
    pub async fn resolve_refresh_token(&self, secret: &str) -> DomainResult<RefreshToken> {
        let token_hash = Self::hash_token(secret);

        self.repository
            .find_by_token_hash(&token_hash)
            .await?
            .ok_or(DomainError::Token(TokenError::InvalidToken))
    }

    /// Checks a presented secret against the user's *current* record.
    ///
    /// The record is re-fetched by user id rather than trusted from the
    /// lookup-by-value, so a concurrent login that superseded the record
    /// between the two reads surfaces as a mismatch.
    ///
    /// # Returns
    ///
    /// * `Ok(RefreshTokenStatus)` - Matching record, valid or expired
    /// * `Err(TokenError::TokenMismatch)` - No current record, or the secret
    ///   does not equal the one on record
    pub async fn validate_refresh_token(
        &self,
        secret: &str,
        user_id: Uuid,
    ) -> DomainResult<RefreshTokenStatus> {
        let current = self
            .repository
            .find_by_user_id(user_id)
            .await?
            .ok_or(DomainError::Token(TokenError::TokenMismatch))?;

        let presented_hash = Self::hash_token(secret);
        if !constant_time_eq(presented_hash.as_bytes(), current.token_hash.as_bytes()) {
            return Err(DomainError::Token(TokenError::TokenMismatch));
        }

        if current.is_expired() {
            Ok(RefreshTokenStatus::Expired)
        } else {
            Ok(RefreshTokenStatus::Valid)
        }
    }

    /// Verifies an access token and returns its claims.
    ///
    /// Checks the signature plus exp, nbf, issuer, and audience.
    pub fn verify_access_token(&self, token: &str) -> DomainResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        DomainError::Token(TokenError::TokenExpired)
                    }
                    jsonwebtoken::errors::ErrorKind::ImmatureSignature => {
                        DomainError::Token(TokenError::TokenNotYetValid)
                    }
                    _ => DomainError::Token(TokenError::InvalidTokenFormat),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Access token lifetime in seconds, as configured
    pub fn access_token_expiry_seconds(&self) -> i64 {
        self.config.access_token_expiry_seconds
    }

    /// Encodes claims into a JWT
    fn encode_jwt(&self, claims: &Claims) -> DomainResult<String> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Generates a random alphanumeric refresh secret
    fn generate_refresh_secret() -> String {
        let mut rng = rand::thread_rng();
        (0..REFRESH_SECRET_LEN)
            .map(|_| {
                let idx = rng.gen_range(0..62);
                match idx {
                    0..10 => (b'0' + idx) as char,
                    10..36 => (b'a' + idx - 10) as char,
                    36..62 => (b'A' + idx - 36) as char,
                    _ => unreachable!(),
                }
            })
            .collect()
    }

    /// Hashes a refresh secret for storage and lookup
    pub(crate) fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
