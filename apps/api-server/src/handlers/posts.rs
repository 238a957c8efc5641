//! Post endpoints: CRUD, pagination, search and the lifecycle-state route.
//!
//! Create and update accept `multipart/form-data` so an image can ride
//! along with the text fields; everything else is plain JSON.

use actix_multipart::form::{MultipartForm, bytes::Bytes as UploadedFile, text::Text};
use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::{Post, PostState};
use quill_core::service::{DEFAULT_PAGE_SIZE, ImageUpload, NewPost, PostPatch};
use quill_shared::dto::{
    ListPostsQuery, PostPageResponse, PostResponse, SearchQuery, SetStateRequest, TagInput,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        category: post.category,
        author: post.author,
        state: post.state.as_str().to_string(),
        image_url: post.image_url,
        tags: post.tags,
        read_time: post.read_time,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

fn image_from(file: UploadedFile) -> ImageUpload {
    ImageUpload {
        bytes: file.data.to_vec(),
        content_type: file
            .content_type
            .map(|m| m.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string()),
    }
}

/// Resolve the token's user id to the stored username. Tokens for deleted
/// accounts die here with 401 before any post is touched.
async fn acting_username(state: &AppState, identity: &Identity) -> Result<String, AppError> {
    let user = state.auth.resolve_user(identity.user_id).await?;
    Ok(user.username.unwrap_or_default())
}

#[derive(Debug, MultipartForm)]
pub struct CreatePostForm {
    pub author: Text<String>,
    pub title: Text<String>,
    pub content: Text<String>,
    pub category: Text<String>,
    pub tags: Option<Text<String>>,
    pub image: Option<UploadedFile>,
}

#[derive(Debug, MultipartForm)]
pub struct UpdatePostForm {
    pub title: Option<Text<String>>,
    pub content: Option<Text<String>>,
    pub state: Option<Text<String>>,
    pub image: Option<UploadedFile>,
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    _identity: Identity,
    MultipartForm(form): MultipartForm<CreatePostForm>,
) -> AppResult<HttpResponse> {
    let tags = form
        .tags
        .map(|t| TagInput::parse_str(&t.into_inner()).into_tags())
        .unwrap_or_default();

    let post = state
        .posts
        .create(NewPost {
            author: form.author.into_inner(),
            title: form.title.into_inner(),
            content: form.content.into_inner(),
            category: form.category.into_inner(),
            tags,
            image: form.image.map(image_from),
        })
        .await?;

    Ok(HttpResponse::Created().json(to_response(post)))
}

/// GET /api/posts
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// GET /api/posts?state=published&author=blard&skip=0&limit=6
///
/// `skip` counts pages, not records.
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let post_state = query
        .state
        .as_deref()
        .map(str::parse::<PostState>)
        .transpose()?;

    let page = state
        .posts
        .list(
            post_state,
            query.author,
            query.skip.unwrap_or(0),
            query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        )
        .await?;

    Ok(HttpResponse::Ok().json(PostPageResponse {
        total: page.total,
        total_pages: page.total_pages,
        current_page: page.current_page,
        posts: page.posts.into_iter().map(to_response).collect(),
    }))
}

/// GET /api/posts/search?term=...
pub async fn search_posts(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.search(&query.term).await?;
    let posts: Vec<_> = posts.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(posts))
}

/// PATCH /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    MultipartForm(form): MultipartForm<UpdatePostForm>,
) -> AppResult<HttpResponse> {
    let username = acting_username(&state, &identity).await?;

    let patch_state = form
        .state
        .map(|s| s.into_inner().parse::<PostState>())
        .transpose()?;

    let post = state
        .posts
        .update(
            path.into_inner(),
            &username,
            PostPatch {
                title: form.title.map(Text::into_inner),
                content: form.content.map(Text::into_inner),
                state: patch_state,
            },
            form.image.map(image_from),
        )
        .await?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let username = acting_username(&state, &identity).await?;
    state.posts.delete(path.into_inner(), &username).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Post deleted successfully"
    })))
}

/// PATCH /api/posts/{id}/state
///
/// Authenticated, but deliberately not author-gated.
pub async fn set_post_state(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<SetStateRequest>,
) -> AppResult<HttpResponse> {
    let post = state.posts.set_state(path.into_inner(), &body.state).await?;
    Ok(HttpResponse::Ok().json(to_response(post)))
}
