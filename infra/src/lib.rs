//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the AuthGate
//! application, following Clean Architecture principles. It provides the
//! concrete MySQL-backed implementations of the repository traits defined
//! in `ag_core`.
//!
//! ## Architecture
//!
//! - **Database**: MySQL implementations using SQLx, plus connection pool
//!   management. Store I/O failures surface as
//!   `DomainError::StoreUnavailable` so callers can distinguish a broken
//!   store from a rejected request.

pub mod database;

pub use database::connection::DatabasePool;
pub use database::mysql::{MySqlTokenRepository, MySqlUserRepository};
