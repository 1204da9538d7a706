//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::errors::AppError;

/// Authenticated caller extracted from the bearer token.
///
/// Handlers take this out of the request extensions and pass the id to
/// services explicitly; no service ever reads the token itself.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
}

/// JWT authentication middleware.
///
/// Extracts and validates the token from the Authorization header, then
/// injects the CurrentUser into the request extensions. Any failure is a
/// 401 before the handler runs.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.tokens.validate(token)?;

    let current_user = CurrentUser {
        id: claims.uid,
        email: claims.sub,
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}
