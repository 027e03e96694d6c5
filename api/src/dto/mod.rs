//! Data transfer objects for the HTTP layer

pub mod auth_dto;

pub use auth_dto::{AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest};
