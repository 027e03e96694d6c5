//! Database module - MySQL implementations using SQLx
//!
//! This module provides the database access layer:
//! - Connection pool management
//! - Repository pattern implementations
//!
//! The reference DDL for the tables lives in `schema.sql` next to this file.

pub mod connection;
pub mod mysql;

// Re-export commonly used types
pub use connection::DatabasePool;
