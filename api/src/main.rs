use actix_web::{web, HttpServer};
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ag_api::app::create_app;
use ag_api::routes::auth::AppState;
use ag_core::errors::DomainError;
use ag_core::services::auth::{AuthService, AuthServiceConfig};
use ag_core::services::token::{
    TokenCleanupConfig, TokenCleanupService, TokenService, TokenServiceConfig,
};
use ag_infra::database::connection::DatabasePool;
use ag_infra::database::mysql::{MySqlTokenRepository, MySqlUserRepository};
use ag_shared::config::AppConfig;

/// Configuration failures abort startup; the service must not accept
/// traffic with a broken signing key or an unreachable store.
fn fatal(err: DomainError) -> std::io::Error {
    error!(error = %err, "startup failed");
    std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Load configuration before logging so the level is honored
    let config = AppConfig::from_env();

    // Initialize structured logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(environment = %config.environment, "starting AuthGate API server");

    // Refuse to serve with the development signing key in production
    if config.environment.is_production() && config.jwt.is_using_default_secret() {
        return Err(fatal(DomainError::Configuration {
            message: "JWT_SECRET must be set in production".to_string(),
        }));
    }

    // Database pool and repositories
    let pool = DatabasePool::new(&config.database).await.map_err(fatal)?;
    let user_repository = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    let token_repository = Arc::new(MySqlTokenRepository::new(pool.get_pool().clone()));

    // Services
    let token_service = Arc::new(
        TokenService::new(
            Arc::clone(&token_repository),
            TokenServiceConfig::from_jwt_config(&config.jwt),
        )
        .map_err(fatal)?,
    );
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        token_service,
        AuthServiceConfig::default(),
    ));

    // Start the refresh token expiry sweeper
    let cleanup_config = TokenCleanupConfig {
        interval_seconds: std::env::var("TOKEN_CLEANUP_INTERVAL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| TokenCleanupConfig::default().interval_seconds),
        enabled: true,
    };
    let cleanup_service = Arc::new(TokenCleanupService::new(
        Arc::clone(&token_repository),
        cleanup_config,
    ));
    let cleanup_handle = cleanup_service.start();

    let app_state = web::Data::new(AppState {
        auth_service: Arc::clone(&auth_service),
    });

    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "server binding");

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server.bind(&bind_address)?.run().await?;

    // Graceful shutdown: cancel the sweeper's timer wait, then drain the pool
    cleanup_handle.stop().await;
    pool.close().await;
    info!("server stopped");

    Ok(())
}
