//! User admin endpoints - list, fetch, update and delete profiles.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::service::UserPatch;
use quill_shared::dto::UpdateUserRequest;

use crate::handlers::auth::user_response;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/users
pub async fn list_users(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users = state.users.list().await?;
    let users: Vec<_> = users.iter().map(user_response).collect();
    Ok(HttpResponse::Ok().json(users))
}

/// GET /api/users/{id}
pub async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user = state.users.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user_response(&user)))
}

/// PUT /api/users/{id}
pub async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateUserRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let user = state
        .users
        .update(
            path.into_inner(),
            UserPatch {
                username: body.username,
                email: body.email,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(user_response(&user)))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.users.delete(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "User deleted successfully"
    })))
}
