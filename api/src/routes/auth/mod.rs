//! Authentication route handlers
//!
//! This module contains all authentication-related endpoints:
//! - Login with email and password
//! - Registration
//! - Refresh token rotation

pub mod login;
pub mod refresh;
pub mod register;

use std::sync::Arc;

use ag_core::repositories::{TokenRepository, UserRepository};
use ag_core::services::auth::AuthService;

/// Shared application state handed to every auth handler
pub struct AppState<U, T>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    /// The credential and token lifecycle manager
    pub auth_service: Arc<AuthService<U, T>>,
}
