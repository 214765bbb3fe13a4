/// Token service: signed, self-contained credentials
///
/// Two token kinds are issued, both HS256-signed with the server secret:
///
/// - **Access**: the bearer token returned by login, presented on every
///   protected request. Expires after 24 hours.
/// - **EmailVerification**: emailed at registration, consumed by the
///   verification endpoint. Expires after 48 hours.
///
/// Verification checks signature, expiration, not-before, and issuer. The
/// type-pinned validators additionally reject a token of the wrong kind, so
/// an emailed verification token can never pass the request gate.
///
/// # Example
///
/// ```
/// use doable_shared::auth::jwt::{create_token, validate_access_token, Claims, TokenType};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "a-secret-key-of-at-least-32-bytes!!";
/// let claims = Claims::new(42, TokenType::Access);
/// let token = create_token(&claims, secret)?;
///
/// let validated = validate_access_token(&token, secret)?;
/// assert_eq!(validated.sub, 42);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Issuer claim stamped into every token
const ISSUER: &str = "doable";

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to validate token (malformed, tampered, wrong issuer)
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Token is valid but of the wrong kind
    #[error("Expected {expected} token, got {actual} token")]
    WrongTokenType {
        expected: &'static str,
        actual: &'static str,
    },
}

/// Token kind identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Bearer token presented on protected requests
    Access,

    /// Single-purpose token emailed for account verification
    EmailVerification,
}

impl TokenType {
    /// Default expiration for this token kind
    pub fn default_expiration(&self) -> Duration {
        match self {
            TokenType::Access => Duration::hours(24),
            TokenType::EmailVerification => Duration::hours(48),
        }
    }

    /// Token kind as string
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::EmailVerification => "email_verification",
        }
    }
}

/// JWT claims
///
/// `sub` carries the user id - the identity the request gate injects into
/// the request context. No other identity data is encoded; handlers that
/// need more must look it up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user id
    pub sub: i64,

    /// Issuer - always "doable"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Token kind (custom claim)
    pub token_type: TokenType,
}

impl Claims {
    /// Creates claims with the default expiration for the token kind
    pub fn new(user_id: i64, token_type: TokenType) -> Self {
        Self::with_expiration(user_id, token_type, token_type.default_expiration())
    }

    /// Creates claims with a custom expiration
    ///
    /// Mostly useful in tests (e.g. an already-expired token).
    pub fn with_expiration(user_id: i64, token_type: TokenType, expires_in: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + expires_in;

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
            token_type,
        }
    }

    /// Checks if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Creates a signed token from claims
///
/// # Errors
///
/// Returns `JwtError::CreateError` if encoding fails.
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a token and extracts its claims
///
/// Verifies the signature against the secret, expiration, not-before, and
/// issuer. Any failure - including a single mutated character - is an
/// error.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

/// Validates a token and checks it's an access token
pub fn validate_access_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let claims = validate_token(token, secret)?;

    if claims.token_type != TokenType::Access {
        return Err(JwtError::WrongTokenType {
            expected: TokenType::Access.as_str(),
            actual: claims.token_type.as_str(),
        });
    }

    Ok(claims)
}

/// Validates a token and checks it's an email-verification token
pub fn validate_verification_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let claims = validate_token(token, secret)?;

    if claims.token_type != TokenType::EmailVerification {
        return Err(JwtError::WrongTokenType {
            expected: TokenType::EmailVerification.as_str(),
            actual: claims.token_type.as_str(),
        });
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_token_type_expiration() {
        assert_eq!(TokenType::Access.default_expiration(), Duration::hours(24));
        assert_eq!(
            TokenType::EmailVerification.default_expiration(),
            Duration::hours(48)
        );
    }

    #[test]
    fn test_claims_creation() {
        let claims = Claims::new(7, TokenType::Access);

        assert_eq!(claims.sub, 7);
        assert_eq!(claims.iss, "doable");
        assert_eq!(claims.token_type, TokenType::Access);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_create_and_validate_token() {
        let claims = Claims::new(42, TokenType::Access);
        let token = create_token(&claims, SECRET).expect("Should create token");

        let validated = validate_token(&token, SECRET).expect("Should validate token");
        assert_eq!(validated.sub, 42);
        assert_eq!(validated.token_type, TokenType::Access);
        assert_eq!(validated.iss, "doable");
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let claims = Claims::new(1, TokenType::Access);
        let token = create_token(&claims, "secret-one-that-is-long-enough!!").unwrap();

        let result = validate_token(&token, "secret-two-that-is-long-enough!!");
        assert!(result.is_err());
    }

    #[test]
    fn test_single_mutated_character_fails() {
        let claims = Claims::new(42, TokenType::Access);
        let token = create_token(&claims, SECRET).unwrap();

        // Flip the last character of the signature segment.
        let mut mutated = token.clone();
        let last = mutated.pop().unwrap();
        mutated.push(if last == 'A' { 'B' } else { 'A' });
        assert_ne!(token, mutated);

        assert!(validate_token(&mutated, SECRET).is_err());
    }

    #[test]
    fn test_validate_expired_token() {
        let claims = Claims::with_expiration(1, TokenType::Access, Duration::seconds(-3600));
        assert!(claims.is_expired());

        let token = create_token(&claims, SECRET).unwrap();
        let result = validate_token(&token, SECRET);

        assert!(matches!(result, Err(JwtError::Expired)));
    }

    #[test]
    fn test_access_validator_rejects_verification_token() {
        let claims = Claims::new(5, TokenType::EmailVerification);
        let token = create_token(&claims, SECRET).unwrap();

        let result = validate_access_token(&token, SECRET);
        assert!(matches!(result, Err(JwtError::WrongTokenType { .. })));
    }

    #[test]
    fn test_verification_validator_rejects_access_token() {
        let claims = Claims::new(5, TokenType::Access);
        let token = create_token(&claims, SECRET).unwrap();

        let result = validate_verification_token(&token, SECRET);
        assert!(matches!(result, Err(JwtError::WrongTokenType { .. })));
    }

    #[test]
    fn test_verification_token_roundtrip() {
        let claims = Claims::new(9, TokenType::EmailVerification);
        let token = create_token(&claims, SECRET).unwrap();

        let validated = validate_verification_token(&token, SECRET).unwrap();
        assert_eq!(validated.sub, 9);
    }
}
