//! MySQL-specific database implementations
//!
//! This module contains MySQL implementations of the repository traits
//! using SQLx for database operations.

pub mod token_repository_impl;
pub mod user_repository_impl;

// Re-export the MySQL implementations
pub use token_repository_impl::MySqlTokenRepository;
pub use user_repository_impl::MySqlUserRepository;
