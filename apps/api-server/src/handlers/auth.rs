//! Authentication endpoints: local register/login, token verification and
//! the Google OAuth flow.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use quill_core::DomainError;
use quill_core::domain::User;
use quill_shared::dto::{
    AuthResponse, LoginRequest, RegisterRequest, UserResponse, VerifyTokenRequest,
};
use quill_shared::ErrorResponse;

use crate::middleware::error::AppResult;
use crate::state::AppState;

pub(super) fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        google_linked: user.google_id.is_some(),
        created_at: user.created_at,
    }
}

fn auth_response(state: &AppState, user: &User, token: String) -> AuthResponse {
    AuthResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.auth.token_lifetime_seconds().max(0) as u64,
        user: user_response(user),
    }
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let user = state
        .auth
        .register(&body.username, &body.email, &body.password)
        .await?;
    let token = state.auth.issue_token(&user)?;

    Ok(HttpResponse::Created().json(auth_response(&state, &user, token)))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let (user, token) = state.auth.login(&body.email, &body.password).await?;

    Ok(HttpResponse::Ok().json(auth_response(&state, &user, token)))
}

/// POST /api/auth/verify
///
/// Out-of-band token check for other services; returns the user the token
/// names if it is still valid and the account still exists.
pub async fn verify(
    state: web::Data<AppState>,
    body: web::Json<VerifyTokenRequest>,
) -> AppResult<HttpResponse> {
    let user = state.auth.verify_token(&body.token).await?;

    Ok(HttpResponse::Ok().json(user_response(&user)))
}

/// GET /api/auth/google
///
/// Redirects the browser to the Google consent screen. Responds 503 when
/// the deployment has no Google credentials configured.
pub async fn google_redirect(state: web::Data<AppState>) -> HttpResponse {
    let Some(oauth) = &state.oauth else {
        return HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
            "oauth_unavailable",
            "Google sign-in is not configured on this server",
        ));
    };

    let csrf_state = uuid::Uuid::new_v4().to_string();
    let url = oauth.authorize_url(&csrf_state);

    HttpResponse::Found()
        .insert_header(("Location", url))
        .finish()
}

#[derive(Debug, Deserialize)]
pub struct GoogleCallbackQuery {
    pub code: String,
    #[allow(dead_code)]
    pub state: Option<String>,
}

/// GET /api/auth/google/callback
pub async fn google_callback(
    state: web::Data<AppState>,
    query: web::Query<GoogleCallbackQuery>,
) -> AppResult<HttpResponse> {
    let Some(oauth) = &state.oauth else {
        return Ok(HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
            "oauth_unavailable",
            "Google sign-in is not configured on this server",
        )));
    };

    let profile = oauth.exchange_code(&query.code).await.map_err(|e| {
        tracing::warn!("google code exchange failed: {}", e);
        DomainError::InvalidToken
    })?;

    let (user, token) = state
        .auth
        .oauth_login(&profile.provider_id, &profile.display_name, &profile.email)
        .await?;

    Ok(HttpResponse::Ok().json(auth_response(&state, &user, token)))
}
