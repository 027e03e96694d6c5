//! Shared utilities and common types for the AuthGate server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Response structures
//! - Validation utilities

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, DatabaseConfig, Environment, JwtConfig, LoggingConfig, ServerConfig,
};
pub use types::response::ErrorResponse;
pub use utils::validation;
