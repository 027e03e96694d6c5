//! HTTP-level handlers and error mapping

pub mod error_handler;

pub use error_handler::{handle_domain_error, validation_error_response};
