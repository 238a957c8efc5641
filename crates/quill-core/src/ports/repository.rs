use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, PostState, User};
use crate::error::RepoError;

/// User repository.
///
/// `insert` must surface uniqueness violations on `email` and `google_id` as
/// [`RepoError::Constraint`]; the OAuth find-or-create race resolves by
/// losing that insert and re-reading.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Case-insensitive username lookup.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, RepoError>;

    async fn list(&self) -> Result<Vec<User>, RepoError>;

    async fn insert(&self, user: User) -> Result<User, RepoError>;

    async fn update(&self, user: User) -> Result<User, RepoError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Exact-match filter for post listing; both fields optional.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub state: Option<PostState>,
    pub author: Option<String>,
}

/// Post repository.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// One page of posts matching `filter`, ordered by creation time
    /// descending. `offset` is a raw record offset; the page-index
    /// arithmetic lives in the workflow service.
    async fn find_page(
        &self,
        filter: &PostFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError>;

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError>;

    /// Case-insensitive substring match of `term` against author or title,
    /// restricted to published posts.
    async fn search(&self, term: &str) -> Result<Vec<Post>, RepoError>;

    async fn insert(&self, post: Post) -> Result<Post, RepoError>;

    async fn update(&self, post: Post) -> Result<Post, RepoError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}
