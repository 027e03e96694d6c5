//! Password hashing and verification
//!
//! Bcrypt comparisons are CPU-bound, so both operations run under
//! `spawn_blocking` to keep request workers free.

use crate::errors::{DomainError, DomainResult};

/// Hash a plaintext password with bcrypt at the given cost.
pub async fn hash_password(password: &str, cost: u32) -> DomainResult<String> {
    let password = password.to_owned();

    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Password hashing task failed: {}", e),
        })?
        .map_err(|e| DomainError::Internal {
            message: format!("Password hashing failed: {}", e),
        })
}

/// Verify a plaintext password against a stored bcrypt hash.
///
/// A wrong password is `Ok(false)`, never an error; only a malformed stored
/// hash is reported as a failure.
pub async fn verify_password(password: &str, hash: &str) -> DomainResult<bool> {
    let password = password.to_owned();
    let hash = hash.to_owned();

    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Password verification task failed: {}", e),
        })?
        .map_err(|e| DomainError::Internal {
            message: format!("Stored credential hash is malformed: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum cost keeps these tests fast; production uses DEFAULT_COST
    const TEST_COST: u32 = 4;

    #[tokio::test]
    async fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("P@ssw0rd1", TEST_COST).await.unwrap();

        assert!(verify_password("P@ssw0rd1", &hash).await.unwrap());
        assert!(!verify_password("wrong-password", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let a = hash_password("P@ssw0rd1", TEST_COST).await.unwrap();
        let b = hash_password("P@ssw0rd1", TEST_COST).await.unwrap();

        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_malformed_hash_is_an_error() {
        let result = verify_password("P@ssw0rd1", "not-a-bcrypt-hash").await;

        assert!(matches!(result, Err(DomainError::Internal { .. })));
    }
}
