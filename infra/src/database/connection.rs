//! Database connection pool management
//!
//! Connection pooling using SQLx with MySQL: pool configuration, health
//! checks, and shutdown.

use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    MySqlPool,
};
use std::str::FromStr;
use std::time::Duration;

use ag_core::errors::DomainError;
use ag_shared::config::DatabaseConfig;

/// Database connection pool wrapper
///
/// Manages the MySQL connection pool with configurable settings for
/// connection limits and timeouts.
#[derive(Clone)]
pub struct DatabasePool {
    /// SQLx MySQL connection pool
    pool: MySqlPool,
}

impl DatabasePool {
    /// Create a new database connection pool
    ///
    /// # Arguments
    /// * `config` - Database configuration settings
    ///
    /// # Returns
    /// * `Ok(Self)` - Connected pool
    /// * `Err(DomainError::Configuration)` - The URL does not parse
    /// * `Err(DomainError::StoreUnavailable)` - The database is unreachable
    pub async fn new(config: &DatabaseConfig) -> Result<Self, DomainError> {
        tracing::info!(
            max_connections = config.max_connections,
            "creating database connection pool"
        );

        let connect_options =
            MySqlConnectOptions::from_str(&config.url).map_err(|e| DomainError::Configuration {
                message: format!("Invalid database URL: {}", e),
            })?;

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .test_before_acquire(true)
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "failed to create database pool");
                DomainError::StoreUnavailable {
                    message: format!("Failed to connect to database: {}", e),
                }
            })?;

        tracing::info!("database connection pool created");

        Ok(Self { pool })
    }

    /// Get a reference to the underlying SQLx pool
    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Check if the database connection is healthy
    pub async fn health_check(&self) -> Result<bool, DomainError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::StoreUnavailable {
                message: format!("Database health check failed: {}", e),
            })?;

        Ok(true)
    }

    /// Close all connections in the pool; called during shutdown
    pub async fn close(&self) {
        tracing::info!("closing database connection pool");
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pool_creation_with_invalid_url() {
        let config = DatabaseConfig {
            url: "invalid://url".to_string(),
            ..DatabaseConfig::default()
        };

        let result = DatabasePool::new(&config).await;
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }
}
