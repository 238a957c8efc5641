//! Error responder - maps the domain error taxonomy onto HTTP statuses and
//! the `{error, message}` envelope.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use quill_core::DomainError;
use quill_shared::ErrorResponse;

/// Application-level error wrapper around [`DomainError`].
#[derive(Debug)]
pub struct AppError(pub DomainError);

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError(err)
    }
}

/// Stable machine-readable code for each taxonomy entry.
fn error_code(err: &DomainError) -> &'static str {
    match err {
        DomainError::InvalidInput(_) => "invalid_input",
        DomainError::DuplicateEmail => "duplicate_email",
        DomainError::InvalidCredentials => "invalid_credentials",
        DomainError::InvalidToken => "invalid_token",
        DomainError::UserNotFound => "user_not_found",
        DomainError::AuthorNotRegistered => "author_not_registered",
        DomainError::NotFound { .. } => "not_found",
        DomainError::Forbidden => "forbidden",
        DomainError::InvalidState(_) => "invalid_state",
        DomainError::UploadFailed(_) => "upload_failed",
        DomainError::Unexpected(_) => "internal",
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            DomainError::InvalidInput(_) | DomainError::AuthorNotRegistered => {
                StatusCode::BAD_REQUEST
            }
            // Wrong password, unknown email and dead tokens all look the
            // same from outside; nothing here aids account enumeration.
            DomainError::InvalidCredentials
            | DomainError::InvalidToken
            | DomainError::UserNotFound => StatusCode::UNAUTHORIZED,
            DomainError::Forbidden => StatusCode::FORBIDDEN,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::DuplicateEmail => StatusCode::CONFLICT,
            DomainError::InvalidState(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DomainError::UploadFailed(_) | DomainError::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match &self.0 {
            DomainError::Unexpected(detail) => {
                // Full detail stays server-side.
                tracing::error!("Unexpected error: {}", detail);
                "Something went wrong".to_string()
            }
            DomainError::UploadFailed(detail) => {
                tracing::error!("Image upload failed: {}", detail);
                "Image upload failed".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code())
            .json(ErrorResponse::new(error_code(&self.0), message))
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_maps_to_its_documented_status() {
        let cases = [
            (DomainError::InvalidInput("x".into()), 400),
            (DomainError::AuthorNotRegistered, 400),
            (DomainError::InvalidCredentials, 401),
            (DomainError::InvalidToken, 401),
            (DomainError::UserNotFound, 401),
            (DomainError::Forbidden, 403),
            (DomainError::NotFound { entity: "post" }, 404),
            (DomainError::DuplicateEmail, 409),
            (DomainError::InvalidState("x".into()), 422),
            (DomainError::UploadFailed("x".into()), 500),
            (DomainError::Unexpected("x".into()), 500),
        ];
        for (err, status) in cases {
            assert_eq!(AppError(err).status_code().as_u16(), status);
        }
    }

    #[actix_web::test]
    async fn unexpected_errors_reach_the_caller_with_a_generic_message() {
        let resp = AppError(DomainError::Unexpected("password hash leaked".into()))
            .error_response();
        // The sensitive detail must not appear in the serialized body.
        let bytes = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(!text.contains("leaked"));
        assert!(text.contains("internal"));
    }
}
