use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth_dto::{AuthResponse, RegisterRequest};
use crate::handlers::error_handler::{handle_domain_error, validation_error_response};

use ag_core::repositories::{TokenRepository, UserRepository};

use super::AppState;

/// Handler for POST /api/v1/auth/register
///
/// Creates a new account and issues its first token pair. Policy violations
/// (password rules, email shape, duplicate email) come back aggregated in
/// the `reasons` detail of a single 400 response.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "string",
///     "username": "string",
///     "password": "string"
/// }
/// ```
///
/// # Responses
/// - 200 OK: `{ "access_token": "...", "refresh_token": "...", "expires_in": 900 }`
/// - 400 Bad Request: `REGISTRATION_FAILED` with the violated rules
/// - 403 Forbidden: Registration disabled
/// - 503 Service Unavailable: Store failure
pub async fn register<U, T>(
    state: web::Data<AppState<U, T>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(errors);
    }

    match state
        .auth_service
        .register(&request.email, &request.username, &request.password)
        .await
    {
        Ok(pair) => HttpResponse::Ok().json(AuthResponse::from(pair)),
        Err(error) => handle_domain_error(error),
    }
}
