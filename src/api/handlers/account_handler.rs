//! Account handlers: registration, login, username lookup.
//!
//! Register and login both answer with the raw signed token string, so a
//! fresh account is signed in by the same request that created it.

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::errors::AppResult;

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// User email address, also the login name
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "alice@x.com")]
    pub email: String,
    /// User password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "Secret123!", min_length = 8)]
    pub password: String,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "alice@x.com")]
    pub email: String,
    /// User password
    #[schema(example = "Secret123!")]
    pub password: String,
}

/// Query parameters for the username lookup
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct GetUsernameParams {
    /// User id to resolve
    pub user_id: Uuid,
}

/// Create account routes
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/getusername", get(get_username))
}

/// Register a new user and sign them in
#[utoipa::path(
    post,
    path = "/api/account/register",
    tag = "Account",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered, returns signed token", body = String),
        (status = 400, description = "Validation error or email already taken")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<String> {
    let user = state
        .account_service
        .register(payload.email, payload.password)
        .await?;

    // The new account is implicitly signed in: this response is its first
    // bearer token
    state.tokens.issue(&user)
}

/// Login and get a signed token
#[utoipa::path(
    post,
    path = "/api/account/login",
    tag = "Account",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, returns signed token", body = String),
        (status = 400, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<String> {
    let user = state
        .account_service
        .login(payload.email, payload.password)
        .await?;

    state.tokens.issue(&user)
}

/// Resolve a user id to the displayed username
#[utoipa::path(
    get,
    path = "/api/account/getusername",
    tag = "Account",
    params(GetUsernameParams),
    responses(
        (status = 200, description = "Username for the given id", body = String),
        (status = 404, description = "No such user")
    )
)]
pub async fn get_username(
    State(state): State<AppState>,
    Query(params): Query<GetUsernameParams>,
) -> AppResult<String> {
    state.account_service.get_username(params.user_id).await
}
