//! User repository trait defining the interface for account persistence.
//!
//! The user store is an external collaborator: the lifecycle manager reads
//! accounts and their password hashes through this trait and asks it to
//! create new accounts, but owns none of the persistence itself.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Implementations handle the actual database operations while maintaining
/// the abstraction boundary between domain and infrastructure layers.
/// Email lookups expect the caller to pass a normalized (trimmed, lowercase)
/// address; the store keeps addresses normalized.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their normalized email address
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with the given email
    /// * `Err(DomainError::StoreUnavailable)` - Store I/O failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Create a new user in the repository
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::Validation)` - Duplicate email
    /// * `Err(DomainError::StoreUnavailable)` - Store I/O failed
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user (e.g. the last-login timestamp)
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Check if a user exists with the given normalized email
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
