//! Main authentication service implementation

use std::sync::Arc;
use tracing::warn;

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::token::{RefreshTokenStatus, TokenService};

use super::config::AuthServiceConfig;
use super::password::{hash_password, verify_password};

use ag_shared::utils::validation::{is_valid_email, normalize_email, validate_password, validators};

/// Authentication service for the complete credential and token lifecycle
///
/// Orchestrates the user store, the password verifier, and the token service
/// to implement login, registration, and refresh token rotation.
pub struct AuthService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    /// User store for account lookup and creation
    user_repository: Arc<U>,
    /// Token service for JWT and refresh token management
    token_service: Arc<TokenService<T>>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, T> AuthService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for account persistence
    /// * `token_service` - Service for token issuance and validation
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService<T>>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            config,
        }
    }

    /// Authenticate a user with email and password.
    ///
    /// This method:
    /// 1. Normalizes the email and looks the account up
    /// 2. Verifies the password against the stored bcrypt hash
    /// 3. Issues a fresh token pair; the new refresh record supersedes any
    ///    previous one, so repeated logins rotate the refresh secret
    ///
    /// An unknown email and a wrong password produce the same
    /// `InvalidCredentials` error so callers cannot enumerate accounts.
    /// On failure no stored state changes.
    ///
    /// # Arguments
    ///
    /// * `email` - The account email (any case; normalized here)
    /// * `password` - The plaintext password to verify
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Fresh access and refresh tokens
    /// * `Err(AuthError::InvalidCredentials)` - Unknown account or wrong password
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<TokenPair> {
        let email = normalize_email(email);

        // Step 1: Look up the account
        let user = match self.user_repository.find_by_email(&email).await? {
            Some(user) => user,
            None => return Err(DomainError::Auth(AuthError::InvalidCredentials)),
        };

        // Step 2: Verify the password
        if !verify_password(password, &user.password_hash).await? {
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }

        // Step 3: Stamp the login time; best effort, the login itself
        // succeeds even if the timestamp write fails
        let mut stamped = user.clone();
        stamped.update_last_login();
        if let Err(e) = self.user_repository.update(stamped).await {
            warn!(error = %e, "failed to update last login timestamp");
        }

        // Step 4: Issue the token pair (supersedes any prior refresh record)
        self.token_service.issue_pair(user.id).await
    }

    /// Register a new user and issue their first token pair.
    ///
    /// Validation failures are aggregated: every violated password rule, a
    /// bad email shape, an empty username, and a duplicate email all land in
    /// the `reasons` list of a single `RegistrationFailed` error rather than
    /// failing one at a time. On success the behavior is exactly a
    /// successful login: a fresh pair, one refresh record.
    ///
    /// # Arguments
    ///
    /// * `email` - The account email (any case; normalized here)
    /// * `username` - Display name for the new account
    /// * `password` - The plaintext password; hashed with bcrypt before storage
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Fresh access and refresh tokens
    /// * `Err(AuthError::RegistrationFailed)` - Policy violations or duplicate email
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> DomainResult<TokenPair> {
        if !self.config.allow_registration {
            return Err(DomainError::Auth(AuthError::RegistrationDisabled));
        }

        let email = normalize_email(email);

        // Step 1: Collect every policy violation before touching the store
        let mut reasons = Vec::new();
        if !is_valid_email(&email) {
            reasons.push("Email address is not valid".to_string());
        }
        if !validators::not_empty(username) {
            reasons.push("Username must not be empty".to_string());
        }
        reasons.extend(validate_password(password));

        // Step 2: Duplicate email is one more reason, checked only when the
        // email itself is well-formed
        if reasons.is_empty() && self.user_repository.exists_by_email(&email).await? {
            reasons.push("Email already registered".to_string());
        }

        if !reasons.is_empty() {
            return Err(DomainError::Auth(AuthError::RegistrationFailed { reasons }));
        }

        // Step 3: Hash the password and create the account
        let password_hash = hash_password(password, self.config.bcrypt_cost).await?;
        let user = User::new(&email, username.to_string(), password_hash);

        let user = match self.user_repository.create(user).await {
            Ok(user) => user,
            // A concurrent registration can still win the race; report it
            // the same way as the pre-check
            Err(DomainError::Validation { message }) => {
                return Err(DomainError::Auth(AuthError::RegistrationFailed {
                    reasons: vec![message],
                }));
            }
            Err(e) => return Err(e),
        };

        // Step 4: Token issuance behaves exactly like a successful login
        self.token_service.issue_pair(user.id).await
    }

    /// Exchange a refresh secret for a new token pair, when rotation is due.
    ///
    /// Exactly one of {rotate-and-return-new-pair, reject-with-reason}
    /// happens per call:
    ///
    /// - Secret unknown to the store → `InvalidToken`
    /// - Secret found, but it is not the owner's current record (a
    ///   superseded or stolen token) → `TokenMismatch`
    /// - Secret matches and the record is still valid → `TokenStillValid`;
    ///   the client's current tokens remain usable and nothing is issued
    /// - Secret matches and the record has expired → rotate: a brand-new
    ///   access token and refresh record, returned as a fresh pair
    ///
    /// Rotation is due only once the stored record has aged out; possession
    /// of the matching secret is what carries the session across that
    /// boundary.
    ///
    /// # Arguments
    ///
    /// * `refresh_secret` - The opaque refresh secret presented by the client
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Rotation happened; fresh access and refresh tokens
    /// * `Err(TokenError)` - `InvalidToken`, `TokenMismatch`, or `TokenStillValid`
    pub async fn refresh_token(&self, refresh_secret: &str) -> DomainResult<TokenPair> {
        // Step 1: Resolve the owner by value
        let record = self.token_service.resolve_refresh_token(refresh_secret).await?;

        // Step 2: Check the secret against the owner's current record
        let status = self
            .token_service
            .validate_refresh_token(refresh_secret, record.user_id)
            .await?;

        match status {
            RefreshTokenStatus::Valid => {
                Err(DomainError::Token(TokenError::TokenStillValid))
            }
            // Step 3: Rotate; the new record supersedes the expired one
            RefreshTokenStatus::Expired => self.token_service.issue_pair(record.user_id).await,
        }
    }
}
