//! Background sweeper for expired refresh tokens
//!
//! Runs on its own timer, fully decoupled from request handling except for
//! the shared token store. A failed tick is logged and the schedule keeps
//! going; sweeping is idempotent, so a lost tick is recovered by the next.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::repositories::TokenRepository;

/// Configuration for the token cleanup service
#[derive(Debug, Clone)]
pub struct TokenCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for TokenCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 6 * 3600, // Run every 6 hours
            enabled: true,
        }
    }
}

/// Service that periodically deletes expired refresh tokens
pub struct TokenCleanupService<R: TokenRepository + 'static> {
    repository: Arc<R>,
    config: TokenCleanupConfig,
}

impl<R: TokenRepository> TokenCleanupService<R> {
    /// Create a new token cleanup service
    pub fn new(repository: Arc<R>, config: TokenCleanupConfig) -> Self {
        Self { repository, config }
    }

    /// Run a single cleanup cycle.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of expired records deleted
    /// * `Err(DomainError)` - If the store is unavailable
    pub async fn run_cleanup(&self) -> Result<usize, DomainError> {
        let removed = self.repository.delete_expired_tokens().await?;
        info!(removed, "refresh token cleanup complete");
        Ok(removed)
    }

    /// Start the cleanup service as a background task.
    ///
    /// The first sweep happens one full interval after startup; after that
    /// the task ticks until the returned handle is stopped. Per-tick errors
    /// never terminate the schedule.
    pub fn start(self: Arc<Self>) -> CleanupHandle {
        let shutdown = Arc::new(Notify::new());

        if !self.config.enabled {
            warn!("token cleanup service is disabled");
            return CleanupHandle {
                shutdown,
                task: None,
            };
        }

        let interval = Duration::from_secs(self.config.interval_seconds);
        let stop = Arc::clone(&shutdown);

        let task = tokio::spawn(async move {
            info!(
                interval_seconds = self.config.interval_seconds,
                "token cleanup service started"
            );

            // First tick fires one full interval from now
            let start = tokio::time::Instant::now() + interval;
            let mut timer = tokio::time::interval_at(start, interval);

            loop {
                tokio::select! {
                    _ = timer.tick() => {
                        if let Err(e) = self.run_cleanup().await {
                            error!(error = %e, "token cleanup cycle failed");
                        }
                    }
                    _ = stop.notified() => {
                        info!("token cleanup service stopping");
                        break;
                    }
                }
            }
        });

        CleanupHandle {
            shutdown,
            task: Some(task),
        }
    }
}

/// Handle for stopping the background cleanup task.
///
/// Dropping the handle without calling [`CleanupHandle::stop`] leaves the
/// task running for the life of the process.
pub struct CleanupHandle {
    shutdown: Arc<Notify>,
    task: Option<JoinHandle<()>>,
}

impl CleanupHandle {
    /// Signal the cleanup task to stop and wait for it to finish.
    ///
    /// Cancels the timer wait promptly; an in-flight delete completes before
    /// the task exits.
    pub async fn stop(mut self) {
        self.shutdown.notify_one();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                error!(error = %e, "token cleanup task panicked");
            }
        }
    }
}
