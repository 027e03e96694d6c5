//! Token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for RefreshToken entity persistence operations
///
/// This trait defines the contract for the refresh token store. The store
/// holds **at most one record per user**: saving a record for a user must
/// atomically replace any record that user already has, and that replacement
/// must be linearizable per user even under concurrent saves.
///
/// # Security Considerations
/// - Only hashed secrets are stored; lookups take the hash, never the raw value
/// - Expired records are removed by the periodic sweeper
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a refresh token record, superseding any existing record for the
    /// same user.
    ///
    /// # Arguments
    /// * `token` - The RefreshToken entity to persist
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The saved record
    /// * `Err(DomainError::StoreUnavailable)` - Store I/O failed
    ///
    /// # Example
    /// ```no_run
    /// # use uuid::Uuid;
    /// # use ag_core::repositories::TokenRepository;
    /// # use ag_core::domain::entities::token::RefreshToken;
    /// # async fn example(repo: &impl TokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let user_id = Uuid::new_v4();
    /// let token = RefreshToken::new(user_id, "hashed_secret".to_string(), 604800);
    ///
    /// let saved = repo.save_refresh_token(token).await?;
    /// println!("Token saved with ID: {}", saved.id);
    /// # Ok(())
    /// # }
    /// ```
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a refresh token by its hashed secret value.
    ///
    /// Resolves "which user does this secret belong to" during refresh.
    ///
    /// # Arguments
    /// * `token_hash` - The hashed secret value to search for
    ///
    /// # Returns
    /// * `Ok(Some(RefreshToken))` - Record found
    /// * `Ok(None)` - No record with the given hash
    /// * `Err(DomainError::StoreUnavailable)` - Store I/O failed
    async fn find_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshToken>, DomainError>;

    /// Find the current refresh token record for a user.
    ///
    /// At most one record exists per user, so this returns an `Option`
    /// rather than a list.
    ///
    /// # Arguments
    /// * `user_id` - The UUID of the user
    ///
    /// # Returns
    /// * `Ok(Some(RefreshToken))` - The user's current record
    /// * `Ok(None)` - The user has no stored refresh token
    /// * `Err(DomainError::StoreUnavailable)` - Store I/O failed
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<RefreshToken>, DomainError>;

    /// Delete every expired refresh token record.
    ///
    /// Called by the expiry sweeper; safe to call repeatedly.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of expired records deleted
    /// * `Err(DomainError::StoreUnavailable)` - Store I/O failed
    async fn delete_expired_tokens(&self) -> Result<usize, DomainError>;
}
