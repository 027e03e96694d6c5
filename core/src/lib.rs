//! # AuthGate Core
//!
//! Core business logic and domain layer for the AuthGate backend.
//! This crate contains domain entities, the credential and token lifecycle
//! services, repository interfaces, and error types that form the foundation
//! of the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Claims, RefreshToken, TokenPair, User};
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{TokenRepository, UserRepository};
pub use services::{
    AuthService, AuthServiceConfig, CleanupHandle, TokenCleanupConfig, TokenCleanupService,
    TokenService, TokenServiceConfig,
};
