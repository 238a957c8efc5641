//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business rule failures surfaced to the HTTP boundary.
///
/// Authentication failures deliberately carry no detail about whether the
/// email existed or the password was wrong, so responses cannot be used for
/// account enumeration.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Author is not a registered user")]
    AuthorNotRegistered,

    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("You are not the author")]
    Forbidden,

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Image upload failed: {0}")]
    UploadFailed(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Default funnel from persistence failures into the domain taxonomy.
///
/// Services that can give a constraint violation a precise meaning (duplicate
/// email on register, the OAuth find-or-create race) match on
/// `RepoError::Constraint` themselves before this conversion applies.
impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => DomainError::NotFound { entity: "record" },
            other => DomainError::Unexpected(other.to_string()),
        }
    }
}
