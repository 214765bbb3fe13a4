/// The request gate
///
/// Every protected route runs through [`authenticate`] before its handler:
/// the bearer token is extracted from the Authorization header, verified,
/// and the resulting [`AuthContext`] is injected into request extensions.
/// That context is the only channel by which a handler learns who is
/// asking.
///
/// # Failure taxonomy
///
/// - header absent → [`GateError::MissingToken`] (401)
/// - header present but not `Bearer <token>` shaped →
///   [`GateError::MalformedToken`] (401)
/// - token fails verification → [`GateError::InvalidToken`] (403)
///
/// The HTTP mapping lives in the API crate's error type; this module stays
/// header-in, identity-out and is unit-testable without a router.

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};

use super::jwt::{validate_access_token, JwtError};

/// Verified identity attached to request extensions
///
/// Handlers extract it with axum's `Extension` extractor. It lives for one
/// request; nothing is cached or reused across requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user id (the bearer-token subject)
    pub user_id: i64,
}

/// Error type for the request gate
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// No Authorization header on the request
    #[error("Authentication token missing")]
    MissingToken,

    /// Authorization header present but not `Bearer <token>` shaped
    #[error("Authentication token malformed")]
    MalformedToken,

    /// Bearer token failed verification
    #[error("Invalid token")]
    InvalidToken(#[source] JwtError),
}

/// Extracts and verifies the bearer token from request headers
///
/// # Errors
///
/// See the module-level failure taxonomy.
pub fn authenticate(headers: &HeaderMap, secret: &str) -> Result<AuthContext, GateError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(GateError::MissingToken)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(GateError::MalformedToken)?;

    let claims = validate_access_token(token, secret).map_err(GateError::InvalidToken)?;

    Ok(AuthContext {
        user_id: claims.sub,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::{create_token, Claims, TokenType};
    use axum::http::HeaderValue;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn test_missing_header() {
        let headers = HeaderMap::new();
        let result = authenticate(&headers, SECRET);
        assert!(matches!(result, Err(GateError::MissingToken)));
    }

    #[test]
    fn test_malformed_header() {
        let headers = headers_with("Basic dXNlcjpwYXNz");
        let result = authenticate(&headers, SECRET);
        assert!(matches!(result, Err(GateError::MalformedToken)));
    }

    #[test]
    fn test_invalid_token() {
        let headers = headers_with("Bearer not-a-real-token");
        let result = authenticate(&headers, SECRET);
        assert!(matches!(result, Err(GateError::InvalidToken(_))));
    }

    #[test]
    fn test_verification_token_rejected_as_bearer() {
        let claims = Claims::new(3, TokenType::EmailVerification);
        let token = create_token(&claims, SECRET).unwrap();

        let headers = headers_with(&format!("Bearer {}", token));
        let result = authenticate(&headers, SECRET);
        assert!(matches!(result, Err(GateError::InvalidToken(_))));
    }

    #[test]
    fn test_valid_token_yields_identity() {
        let claims = Claims::new(42, TokenType::Access);
        let token = create_token(&claims, SECRET).unwrap();

        let headers = headers_with(&format!("Bearer {}", token));
        let context = authenticate(&headers, SECRET).unwrap();
        assert_eq!(context.user_id, 42);
    }
}
