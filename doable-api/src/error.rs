/// Error handling for the API server
///
/// A unified error type that maps to HTTP responses. Handlers return
/// `Result<T, ApiError>`, which converts to the right status code and a
/// JSON body carrying an error code and a human-readable message.
///
/// Propagation policy: validation failures are produced at the boundary,
/// before any store access. Ownership failures surface as 404 without
/// distinguishing "absent" from "exists but unauthorized". Unexpected
/// store failures are logged server-side and surfaced as a generic 500
/// with no internal detail.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use doable_shared::auth::{jwt::JwtError, middleware::GateError, password::PasswordError};
use serde::{Deserialize, Serialize};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Field-level validation failure (400)
    #[error("Validation failed: {} errors", .0.len())]
    Validation(Vec<FieldError>),

    /// Unauthorized (401) - missing/malformed token, bad credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Forbidden (403) - a presented token failed verification
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Not found (404) - absent or not owned, indistinguishable
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict (409) - duplicate email, duplicate grant
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error (500)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// One field-level validation failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g. "not_found", "unauthorized")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional field-level details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::Internal(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert store errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("email") {
                        return ApiError::Conflict("Email already registered".to_string());
                    }
                    if constraint.contains("category_shares") {
                        return ApiError::Conflict("Category already shared with this user".to_string());
                    }
                    return ApiError::Conflict(format!("Constraint violation: {}", constraint));
                }

                ApiError::Internal(format!("Database error: {}", db_err))
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert request-gate errors to API errors
///
/// Missing and malformed headers are 401; a token that fails verification
/// is 403.
impl From<GateError> for ApiError {
    fn from(err: GateError) -> Self {
        match err {
            GateError::MissingToken => {
                ApiError::Unauthorized("Authentication token missing".to_string())
            }
            GateError::MalformedToken => {
                ApiError::Unauthorized("Authentication token malformed".to_string())
            }
            GateError::InvalidToken(_) => ApiError::Forbidden("Invalid token".to_string()),
        }
    }
}

/// Convert token errors to API errors (verification endpoint)
impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => ApiError::Forbidden("Token expired".to_string()),
            _ => ApiError::Forbidden("Invalid token".to_string()),
        }
    }
}

/// Convert password errors to API errors
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(format!("Password operation failed: {}", err))
    }
}

/// Convert validator output to the field-error list
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| FieldError {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();

        ApiError::Validation(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid input");

        let err = ApiError::NotFound("Todo not found".to_string());
        assert_eq!(err.to_string(), "Not found: Todo not found");
    }

    #[test]
    fn test_status_codes() {
        let cases = vec![
            (
                ApiError::Validation(vec![]).into_response().status(),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Unauthorized("x".into()).into_response().status(),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ApiError::Forbidden("x".into()).into_response().status(),
                StatusCode::FORBIDDEN,
            ),
            (
                ApiError::NotFound("x".into()).into_response().status(),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::Conflict("x".into()).into_response().status(),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::Internal("x".into()).into_response().status(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (actual, expected) in cases {
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_gate_error_mapping() {
        let err: ApiError = GateError::MissingToken.into();
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);

        let err: ApiError = GateError::MalformedToken.into();
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_row_not_found_maps_to_404() {
        let err: ApiError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
