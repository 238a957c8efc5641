//! Token and password service ports.

use uuid::Uuid;

/// Claims carried by a bearer token: the user id and the expiry instant.
/// The token scheme itself is opaque to the domain layer.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub exp: i64,
}

/// Signed, time-limited credential service.
pub trait TokenService: Send + Sync {
    /// Issue a token embedding the user id and an expiration.
    fn generate_token(&self, user_id: Uuid) -> Result<String, AuthError>;

    /// Validate signature and expiry, returning the embedded claims.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Token lifetime, for `expires_in` fields in responses.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service. `verify` must compare in constant time.
pub trait PasswordService: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication port errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
