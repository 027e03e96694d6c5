//! MySQL implementation of the TokenRepository trait.
//!
//! Concrete refresh token persistence using MySQL with SQLx. Only SHA-256
//! digests of secrets are stored; the save path replaces the user's previous
//! record inside a single transaction so the one-record-per-user invariant
//! holds even under concurrent logins.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ag_core::domain::entities::token::RefreshToken;
use ag_core::errors::DomainError;
use ag_core::repositories::TokenRepository;

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Hash a raw token value using SHA-256
    ///
    /// # Returns
    /// Hexadecimal string representation of the SHA-256 hash
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Convert a database row to a RefreshToken entity
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<RefreshToken, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        let user_id: String = row.try_get("user_id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get user_id: {}", e),
        })?;

        Ok(RefreshToken {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid token UUID: {}", e),
            })?,
            user_id: Uuid::parse_str(&user_id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            token_hash: row.try_get("token_hash").map_err(|e| DomainError::Internal {
                message: format!("Failed to get token_hash: {}", e),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get expires_at: {}", e),
                })?,
        })
    }

    fn store_error(context: &str, e: sqlx::Error) -> DomainError {
        DomainError::StoreUnavailable {
            message: format!("{}: {}", context, e),
        }
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        // Delete-then-insert in one transaction: the user's previous record
        // is superseded atomically, and concurrent saves for the same user
        // serialize on the user_id unique key.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Self::store_error("Failed to begin transaction", e))?;

        sqlx::query("DELETE FROM refresh_tokens WHERE user_id = ?")
            .bind(token.user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| Self::store_error("Failed to supersede refresh token", e))?;

        let query = r#"
            INSERT INTO refresh_tokens (
                id, user_id, token_hash, created_at, expires_at
            ) VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(token.id.to_string())
            .bind(token.user_id.to_string())
            .bind(&token.token_hash)
            .bind(token.created_at)
            .bind(token.expires_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| Self::store_error("Failed to save refresh token", e))?;

        tx.commit()
            .await
            .map_err(|e| Self::store_error("Failed to commit refresh token save", e))?;

        Ok(token)
    }

    async fn find_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshToken>, DomainError> {
        let query = r#"
            SELECT id, user_id, token_hash, created_at, expires_at
            FROM refresh_tokens
            WHERE token_hash = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::store_error("Failed to find refresh token", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_token(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<RefreshToken>, DomainError> {
        let query = r#"
            SELECT id, user_id, token_hash, created_at, expires_at
            FROM refresh_tokens
            WHERE user_id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::store_error("Failed to find user token", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_token(&row)?)),
            None => Ok(None),
        }
    }

    async fn delete_expired_tokens(&self) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::store_error("Failed to delete expired tokens", e))?;

        Ok(result.rows_affected() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_hashing() {
        let hash1 = MySqlTokenRepository::hash_token("refresh_secret_1");
        let hash2 = MySqlTokenRepository::hash_token("refresh_secret_2");
        let hash1_dup = MySqlTokenRepository::hash_token("refresh_secret_1");

        // Same input should produce same hash
        assert_eq!(hash1, hash1_dup);

        // Different inputs should produce different hashes
        assert_ne!(hash1, hash2);

        // Hash should be 64 characters (SHA-256 in hex)
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_token_hash_is_opaque() {
        let token = "k3J9mPq2xRv8nWb5tYc1zLf4hGd7sNa0";
        let hash = MySqlTokenRepository::hash_token(token);

        // Hash should not contain the original secret
        assert!(!hash.contains(token));
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
