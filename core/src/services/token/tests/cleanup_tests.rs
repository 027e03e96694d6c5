//! Unit tests for the expiry sweeper

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;
use crate::repositories::token::{MockTokenRepository, TokenRepository};
use crate::services::token::{TokenCleanupConfig, TokenCleanupService};

fn expired_token() -> RefreshToken {
    let mut token = RefreshToken::new(Uuid::new_v4(), "expired_hash".to_string(), 604800);
    token.expires_at = Utc::now() - Duration::hours(1);
    token
}

#[tokio::test]
async fn test_run_cleanup_reports_removed_count() {
    let repo = Arc::new(MockTokenRepository::new());
    repo.save_refresh_token(expired_token()).await.unwrap();
    repo.save_refresh_token(RefreshToken::new(
        Uuid::new_v4(),
        "live_hash".to_string(),
        604800,
    ))
    .await
    .unwrap();

    let service = TokenCleanupService::new(Arc::clone(&repo), TokenCleanupConfig::default());

    assert_eq!(service.run_cleanup().await.unwrap(), 1);
    assert_eq!(service.run_cleanup().await.unwrap(), 0);
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_background_task_sweeps_on_schedule() {
    let repo = Arc::new(MockTokenRepository::new());
    repo.save_refresh_token(expired_token()).await.unwrap();

    let config = TokenCleanupConfig {
        interval_seconds: 1,
        enabled: true,
    };
    let service = Arc::new(TokenCleanupService::new(Arc::clone(&repo), config));
    let handle = service.start();

    // First tick fires one interval after start
    tokio::time::sleep(std::time::Duration::from_millis(1500)).await;
    assert_eq!(repo.len().await, 0);

    handle.stop().await;
}

#[tokio::test]
async fn test_stop_cancels_timer_wait_promptly() {
    let repo = Arc::new(MockTokenRepository::new());
    let config = TokenCleanupConfig {
        interval_seconds: 3600,
        enabled: true,
    };
    let service = Arc::new(TokenCleanupService::new(repo, config));
    let handle = service.start();

    // Must return well before the first tick would fire
    tokio::time::timeout(std::time::Duration::from_secs(1), handle.stop())
        .await
        .expect("stop() should cancel the timer wait");
}

#[tokio::test]
async fn test_disabled_service_spawns_nothing() {
    let repo = Arc::new(MockTokenRepository::new());
    repo.save_refresh_token(expired_token()).await.unwrap();

    let config = TokenCleanupConfig {
        interval_seconds: 1,
        enabled: false,
    };
    let service = Arc::new(TokenCleanupService::new(Arc::clone(&repo), config));
    let handle = service.start();

    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    assert_eq!(repo.len().await, 1);

    handle.stop().await;
}

/// Store wrapper that fails its first sweep; the schedule must survive and
/// succeed on the next tick.
struct FlakyRepository {
    inner: MockTokenRepository,
    failed_once: AtomicBool,
}

#[async_trait]
impl TokenRepository for FlakyRepository {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        self.inner.save_refresh_token(token).await
    }

    async fn find_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshToken>, DomainError> {
        self.inner.find_by_token_hash(token_hash).await
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<RefreshToken>, DomainError> {
        self.inner.find_by_user_id(user_id).await
    }

    async fn delete_expired_tokens(&self) -> Result<usize, DomainError> {
        if !self.failed_once.swap(true, Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable {
                message: "connection reset".to_string(),
            });
        }
        self.inner.delete_expired_tokens().await
    }
}

#[tokio::test]
async fn test_failed_tick_does_not_terminate_the_schedule() {
    let repo = Arc::new(FlakyRepository {
        inner: MockTokenRepository::new(),
        failed_once: AtomicBool::new(false),
    });
    repo.save_refresh_token(expired_token()).await.unwrap();

    let config = TokenCleanupConfig {
        interval_seconds: 1,
        enabled: true,
    };
    let service = Arc::new(TokenCleanupService::new(Arc::clone(&repo), config));
    let handle = service.start();

    // Tick one fails, tick two must still run and remove the record
    tokio::time::sleep(std::time::Duration::from_millis(2500)).await;
    assert!(repo.failed_once.load(Ordering::SeqCst));
    assert_eq!(repo.inner.len().await, 0);

    handle.stop().await;
}
