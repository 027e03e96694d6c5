//! Maps domain errors onto HTTP responses.
//!
//! Bodies stay generic: credential failures never reveal whether the email
//! or the password was wrong, and no response or log line ever carries a
//! raw secret. Token errors carry just enough to distinguish "log in again"
//! from "try refreshing again later".

use actix_web::HttpResponse;
use tracing::error;

use ag_core::errors::{AuthError, DomainError, TokenError};
use ag_shared::types::response::ErrorResponse;

/// Convert a domain error into the appropriate HTTP response
pub fn handle_domain_error(err: DomainError) -> HttpResponse {
    match err {
        DomainError::Auth(AuthError::InvalidCredentials) => HttpResponse::Unauthorized()
            .json(ErrorResponse::new(
                "INVALID_CREDENTIALS",
                "Invalid email or password",
            )),

        DomainError::Auth(AuthError::RegistrationFailed { reasons }) => {
            HttpResponse::BadRequest().json(
                ErrorResponse::new("REGISTRATION_FAILED", "Registration failed")
                    .with_detail("reasons", serde_json::json!(reasons)),
            )
        }

        DomainError::Auth(AuthError::RegistrationDisabled) => HttpResponse::Forbidden().json(
            ErrorResponse::new("REGISTRATION_DISABLED", "Registration is currently disabled"),
        ),

        // Unknown secret: the session cannot be recovered, log in again
        DomainError::Token(TokenError::InvalidToken) => HttpResponse::Unauthorized()
            .json(ErrorResponse::new("INVALID_TOKEN", "Invalid token")),

        // Superseded or stolen secret: log in again
        DomainError::Token(TokenError::TokenMismatch) => HttpResponse::Unauthorized()
            .json(ErrorResponse::new("TOKEN_MISMATCH", "Token mismatch")),

        // Rotation not due yet: current tokens still work, retry later
        DomainError::Token(TokenError::TokenStillValid) => HttpResponse::BadRequest().json(
            ErrorResponse::new("TOKEN_STILL_VALID", "Token is still valid"),
        ),

        DomainError::Token(_) => {
            HttpResponse::Unauthorized().json(ErrorResponse::new("INVALID_TOKEN", "Invalid token"))
        }

        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(ErrorResponse::new("VALIDATION_ERROR", message))
        }

        DomainError::NotFound { resource } => HttpResponse::NotFound().json(ErrorResponse::new(
            "NOT_FOUND",
            format!("{} not found", resource),
        )),

        DomainError::StoreUnavailable { message } => {
            error!(error = %message, "store unavailable");
            HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
                "STORE_UNAVAILABLE",
                "Service temporarily unavailable, please retry",
            ))
        }

        DomainError::Configuration { message } | DomainError::Internal { message } => {
            error!(error = %message, "internal error");
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "INTERNAL_ERROR",
                "An internal error occurred",
            ))
        }
    }
}

/// Convert request DTO validation failures into a 400 response
pub fn validation_error_response(errors: validator::ValidationErrors) -> HttpResponse {
    let fields: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();

    HttpResponse::BadRequest().json(
        ErrorResponse::new("VALIDATION_ERROR", "Invalid request")
            .with_detail("fields", serde_json::json!(fields)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_maps_to_401() {
        let response = handle_domain_error(DomainError::Auth(AuthError::InvalidCredentials));
        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_registration_failed_maps_to_400() {
        let response = handle_domain_error(DomainError::Auth(AuthError::RegistrationFailed {
            reasons: vec!["Email already registered".to_string()],
        }));
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_token_still_valid_maps_to_400() {
        let response = handle_domain_error(DomainError::Token(TokenError::TokenStillValid));
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_store_unavailable_maps_to_503() {
        let response = handle_domain_error(DomainError::StoreUnavailable {
            message: "connection refused".to_string(),
        });
        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
