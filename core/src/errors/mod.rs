//! Domain-specific error types and error handling.
//!
//! All per-request failures are typed results from this module; nothing in
//! the core panics on bad input. `Configuration` is the one class that is
//! allowed to abort process startup.

mod types;

pub use types::{AuthError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// The backing store failed an I/O operation. Fatal to the current
    /// request, retryable by the caller.
    #[error("Store unavailable: {message}")]
    StoreUnavailable { message: String },

    /// Missing or malformed startup configuration (e.g. the signing key).
    /// Must prevent the service from accepting traffic.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

pub type DomainResult<T> = Result<T, DomainError>;
