use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth_dto::{AuthResponse, LoginRequest};
use crate::handlers::error_handler::{handle_domain_error, validation_error_response};

use ag_core::repositories::{TokenRepository, UserRepository};

use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// Authenticates a user and returns a fresh token pair. The refresh secret
/// supersedes any previously issued one for the account.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "string",
///     "password": "string"
/// }
/// ```
///
/// # Responses
/// - 200 OK: `{ "access_token": "...", "refresh_token": "...", "expires_in": 900 }`
/// - 401 Unauthorized: Unknown account or wrong password (not distinguished)
/// - 503 Service Unavailable: Store failure
pub async fn login<U, T>(
    state: web::Data<AppState<U, T>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(errors);
    }

    match state.auth_service.login(&request.email, &request.password).await {
        Ok(pair) => HttpResponse::Ok().json(AuthResponse::from(pair)),
        Err(error) => handle_domain_error(error),
    }
}
