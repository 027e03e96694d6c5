//! Unit tests for the mock token repository implementation

use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::repositories::token::{MockTokenRepository, TokenRepository};

const REFRESH_TTL_SECONDS: i64 = 604800;

#[tokio::test]
async fn test_save_and_find_refresh_token() {
    let repo = MockTokenRepository::new();
    let user_id = Uuid::new_v4();

    let token = RefreshToken::new(user_id, "test_hash".to_string(), REFRESH_TTL_SECONDS);
    let saved = repo.save_refresh_token(token.clone()).await.unwrap();
    assert_eq!(saved.id, token.id);

    let by_hash = repo.find_by_token_hash("test_hash").await.unwrap();
    assert_eq!(by_hash, Some(token.clone()));

    let by_user = repo.find_by_user_id(user_id).await.unwrap();
    assert_eq!(by_user, Some(token));
}

#[tokio::test]
async fn test_find_unknown_hash_returns_none() {
    let repo = MockTokenRepository::new();

    let found = repo.find_by_token_hash("no_such_hash").await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_save_supersedes_existing_record() {
    let repo = MockTokenRepository::new();
    let user_id = Uuid::new_v4();

    let first = RefreshToken::new(user_id, "first_hash".to_string(), REFRESH_TTL_SECONDS);
    let second = RefreshToken::new(user_id, "second_hash".to_string(), REFRESH_TTL_SECONDS);

    repo.save_refresh_token(first).await.unwrap();
    repo.save_refresh_token(second.clone()).await.unwrap();

    // Exactly one record survives, and it is the newer one
    assert_eq!(repo.len().await, 1);
    let current = repo.find_by_user_id(user_id).await.unwrap().unwrap();
    assert_eq!(current.token_hash, "second_hash");

    // The superseded secret is permanently unmatched
    let old = repo.find_by_token_hash("first_hash").await.unwrap();
    assert!(old.is_none());
}

#[tokio::test]
async fn test_supersession_is_per_user() {
    let repo = MockTokenRepository::new();
    let user_a = Uuid::new_v4();
    let user_b = Uuid::new_v4();

    repo.save_refresh_token(RefreshToken::new(user_a, "hash_a".to_string(), REFRESH_TTL_SECONDS))
        .await
        .unwrap();
    repo.save_refresh_token(RefreshToken::new(user_b, "hash_b".to_string(), REFRESH_TTL_SECONDS))
        .await
        .unwrap();

    assert_eq!(repo.len().await, 2);
    assert!(repo.find_by_token_hash("hash_a").await.unwrap().is_some());
    assert!(repo.find_by_token_hash("hash_b").await.unwrap().is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_saves_leave_exactly_one_record() {
    // N concurrent saves for the same user must be serialized by the store:
    // exactly one record survives, whichever writer came last.
    for n in 2..=10 {
        let repo = Arc::new(MockTokenRepository::new());
        let user_id = Uuid::new_v4();

        let mut handles = Vec::new();
        for i in 0..n {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                let token =
                    RefreshToken::new(user_id, format!("hash_{}", i), REFRESH_TTL_SECONDS);
                repo.save_refresh_token(token).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(repo.len().await, 1, "n={} concurrent saves", n);
        let survivor = repo.find_by_user_id(user_id).await.unwrap().unwrap();
        assert!(survivor.token_hash.starts_with("hash_"));
    }
}

#[tokio::test]
async fn test_delete_expired_tokens_is_idempotent() {
    let repo = MockTokenRepository::new();

    let mut expired = RefreshToken::new(Uuid::new_v4(), "expired".to_string(), REFRESH_TTL_SECONDS);
    expired.expires_at = Utc::now() - Duration::hours(1);
    let live = RefreshToken::new(Uuid::new_v4(), "live".to_string(), REFRESH_TTL_SECONDS);

    repo.save_refresh_token(expired).await.unwrap();
    repo.save_refresh_token(live).await.unwrap();

    // First sweep removes the expired record, second finds nothing
    assert_eq!(repo.delete_expired_tokens().await.unwrap(), 1);
    assert_eq!(repo.delete_expired_tokens().await.unwrap(), 0);

    assert!(repo.find_by_token_hash("live").await.unwrap().is_some());
    assert!(repo.find_by_token_hash("expired").await.unwrap().is_none());
}
