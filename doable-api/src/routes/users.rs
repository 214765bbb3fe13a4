/// Account endpoints
///
/// - `POST /users/register` - create an account, unverified
/// - `GET /users/verify/:token` - consume a verification token
/// - `POST /users/login` - authenticate and receive a bearer token
///
/// Login reports unknown email, unverified account, and wrong password as
/// the same 401 so a caller can't enumerate accounts or probe their state.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use doable_shared::{
    auth::{
        jwt::{self, Claims, TokenType},
        password,
    },
    models::user::{NewUser, User},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (hashed before storage, never logged)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Public view of a user, without credentials
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User id
    pub id: i64,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Human-readable confirmation
    pub message: String,

    /// The created account
    pub user: UserResponse,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    pub token: String,
}

/// Register a new user
///
/// Validates the payload, hashes the password, persists the account with
/// the verification flag unset, and dispatches a verification notice. No
/// bearer token is returned - the account can't log in until verified.
///
/// # Errors
///
/// - `400`: validation failed
/// - `409`: email already registered
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    req.validate()?;

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        NewUser {
            name: req.name,
            email: req.email,
            password_hash,
        },
    )
    .await?;

    let claims = Claims::new(user.id, TokenType::EmailVerification);
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    // Delivery is an external collaborator; a dispatch failure must not
    // fail the registration.
    if let Err(e) = state
        .mailer
        .send_verification(&user.email, &user.name, &token)
        .await
    {
        tracing::warn!(user_id = user.id, "Verification dispatch failed: {}", e);
    }

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered. Check your email to verify the account.".to_string(),
            user: user.into(),
        }),
    ))
}

/// Consume an email-verification token
///
/// Idempotent: verifying an already-verified account returns 200 again.
///
/// # Errors
///
/// - `403`: token invalid or expired
/// - `404`: token subject no longer exists
pub async fn verify_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let claims = jwt::validate_verification_token(&token, state.jwt_secret())?;

    let found = User::mark_email_verified(&state.db, claims.sub).await?;
    if !found {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    Ok(Json(serde_json::json!({
        "message": "Email verified. You can now log in."
    })))
}

/// Authenticate and issue a bearer token
///
/// # Errors
///
/// - `400`: validation failed
/// - `401`: invalid credentials - the same response whether the email is
///   unknown, the account is unverified, or the password is wrong
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()?;

    let invalid = || ApiError::Unauthorized("Invalid email or password".to_string());

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(invalid)?;

    if !user.email_verified {
        return Err(invalid());
    }

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(invalid());
    }

    let claims = Claims::new(user.id, TokenType::Access);
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(Json(LoginResponse { token }))
}
