//! Authentication and token error definitions.
//!
//! Error messages here are generic on purpose: credential failures never
//! reveal whether the email or the password was wrong, and token errors
//! never echo the presented secret.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Wrong password or unknown identity; deliberately not distinguished
    /// to avoid account enumeration.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Registration rejected; carries every violated policy rule.
    #[error("Registration failed: {}", reasons.join("; "))]
    RegistrationFailed { reasons: Vec<String> },

    #[error("Registration is currently disabled")]
    RegistrationDisabled,
}

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    /// The presented refresh secret is unknown to the store.
    #[error("Invalid token")]
    InvalidToken,

    /// A record exists for the resolved user but the presented secret does
    /// not equal the one on record: a superseded or stolen token.
    #[error("Token mismatch")]
    TokenMismatch,

    /// The refresh token is still within its validity window; rotation is
    /// not due.
    #[error("Token is still valid")]
    TokenStillValid,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token not yet valid")]
    TokenNotYetValid,
}
