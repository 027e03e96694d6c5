use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth_dto::{AuthResponse, RefreshTokenRequest};
use crate::handlers::error_handler::{handle_domain_error, validation_error_response};

use ag_core::repositories::{TokenRepository, UserRepository};

use super::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a refresh secret for a new token pair once rotation is due.
/// A secret whose record is still within its validity window is rejected
/// with `TOKEN_STILL_VALID`: the client's current tokens remain usable.
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "string"
/// }
/// ```
///
/// # Responses
/// - 200 OK: rotation happened, fresh pair returned
/// - 400 Bad Request: `TOKEN_STILL_VALID`, retry once the current pair ages out
/// - 401 Unauthorized: `INVALID_TOKEN` or `TOKEN_MISMATCH`, log in again
/// - 503 Service Unavailable: Store failure
pub async fn refresh<U, T>(
    state: web::Data<AppState<U, T>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(errors);
    }

    match state.auth_service.refresh_token(&request.refresh_token).await {
        Ok(pair) => HttpResponse::Ok().json(AuthResponse::from(pair)),
        Err(error) => handle_domain_error(error),
    }
}
