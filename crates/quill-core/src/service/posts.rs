//! Post workflow service - lifecycle and query operations for blog posts.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Post, PostState};
use crate::error::DomainError;
use crate::ports::{ObjectStorage, PostFilter, PostRepository, UserRepository};
use crate::service::guard::authorize_mutation;

/// Default page size when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: u64 = 6;

/// An image to attach to a post, uploaded to object storage before the post
/// itself is persisted.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Input for `create`. Tags arrive already normalized to an ordered list;
/// the comma-splitting of the string form happens at the input boundary.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub image: Option<ImageUpload>,
}

/// Partial update; absent fields are left untouched, never nulled.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub state: Option<PostState>,
}

/// One page of posts plus the pagination bookkeeping the API exposes.
#[derive(Debug, Clone)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub total: u64,
    pub total_pages: u64,
    pub current_page: u64,
}

/// All post lifecycle and query operations.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
    storage: Arc<dyn ObjectStorage>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self {
            posts,
            users,
            storage,
        }
    }

    /// Create a new draft post. The author name must resolve to a registered
    /// user; the post records that user's stored username. A supplied image
    /// is uploaded first, so a failed upload aborts the create with nothing
    /// persisted.
    pub async fn create(&self, input: NewPost) -> Result<Post, DomainError> {
        let author = self
            .users
            .find_by_username(input.author.trim())
            .await?
            .ok_or(DomainError::AuthorNotRegistered)?;

        if input.title.trim().is_empty()
            || input.content.trim().is_empty()
            || input.category.trim().is_empty()
        {
            return Err(DomainError::InvalidInput(
                "title, content and category are required".into(),
            ));
        }

        let image_url = match input.image {
            Some(image) => Some(self.upload_image(image).await?),
            None => None,
        };

        let post = Post::new(
            // Canonical casing comes from the user record, as stored.
            author.username.clone().unwrap_or(input.author),
            input.title,
            input.content,
            input.category,
            input.tags,
            image_url,
        );

        let post = self.posts.insert(post).await?;
        tracing::info!(post_id = %post.id, author = %post.author, "post created");
        Ok(post)
    }

    /// Fetch a single post.
    pub async fn get(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound { entity: "post" })
    }

    /// List posts, newest first, with optional exact-match state/author
    /// filters.
    ///
    /// `skip` is a page index, not a record offset: the store offset is
    /// `skip * limit`. An unusual contract, but it is what the API has
    /// always exposed, so it is preserved exactly.
    pub async fn list(
        &self,
        state: Option<PostState>,
        author: Option<String>,
        skip: u64,
        limit: u64,
    ) -> Result<PostPage, DomainError> {
        if limit == 0 {
            return Err(DomainError::InvalidInput("limit must be positive".into()));
        }
        // Both come straight off the query string, so the page arithmetic
        // must not be allowed to wrap.
        let offset = skip
            .checked_mul(limit)
            .ok_or_else(|| DomainError::InvalidInput("page index out of range".into()))?;
        let current_page = skip
            .checked_add(1)
            .ok_or_else(|| DomainError::InvalidInput("page index out of range".into()))?;

        let filter = PostFilter { state, author };
        let total = self.posts.count(&filter).await?;
        let posts = self.posts.find_page(&filter, offset, limit).await?;

        Ok(PostPage {
            posts,
            total,
            total_pages: total.div_ceil(limit),
            current_page,
        })
    }

    /// Apply a partial update to a post the acting user authored.
    pub async fn update(
        &self,
        id: Uuid,
        acting_username: &str,
        patch: PostPatch,
        image: Option<ImageUpload>,
    ) -> Result<Post, DomainError> {
        let mut post = self.get(id).await?;
        authorize_mutation(acting_username, &post)?;

        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(DomainError::InvalidInput("title cannot be empty".into()));
            }
        }
        if let Some(content) = &patch.content {
            if content.trim().is_empty() {
                return Err(DomainError::InvalidInput("content cannot be empty".into()));
            }
        }

        // Upload before touching the record so a storage failure leaves the
        // post exactly as it was.
        if let Some(image) = image {
            post.image_url = Some(self.upload_image(image).await?);
        }

        if let Some(title) = patch.title {
            post.title = title;
        }
        if let Some(content) = patch.content {
            post.content = content;
        }
        if let Some(state) = patch.state {
            post.state = state;
        }
        post.updated_at = Utc::now();

        Ok(self.posts.update(post).await?)
    }

    /// Delete a post the acting user authored.
    pub async fn delete(&self, id: Uuid, acting_username: &str) -> Result<(), DomainError> {
        let post = self.get(id).await?;
        authorize_mutation(acting_username, &post)?;

        self.posts.delete(id).await?;
        tracing::info!(post_id = %id, "post deleted");
        Ok(())
    }

    /// Case-insensitive substring search over author and title, published
    /// posts only. Drafts never match, whoever wrote them.
    pub async fn search(&self, term: &str) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.search(term).await?)
    }

    /// Change a post's lifecycle state.
    ///
    /// Unlike `update` and `delete`, this checks state validity and
    /// existence but not authorship; the route behind it is authenticated
    /// but any signed-in user may flip the state. That asymmetry matches
    /// the API's documented behavior (see DESIGN.md) and is not corrected
    /// here.
    pub async fn set_state(&self, id: Uuid, state: &str) -> Result<Post, DomainError> {
        let state: PostState = state.parse()?;

        let mut post = self.get(id).await?;
        post.state = state;
        post.updated_at = Utc::now();

        Ok(self.posts.update(post).await?)
    }

    async fn upload_image(&self, image: ImageUpload) -> Result<String, DomainError> {
        self.storage
            .upload(image.bytes, &image.content_type)
            .await
            .map_err(|e| DomainError::UploadFailed(e.to_string()))
    }
}
