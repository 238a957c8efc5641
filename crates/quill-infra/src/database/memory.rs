//! In-memory repositories - used as fallback when no database is configured
//! and as the substrate for handler tests.
//!
//! Data is lost on process restart. The uniqueness constraints on email and
//! google_id are enforced here too, so the OAuth find-or-create contract
//! behaves the same against both backends.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Post, PostState, User};
use quill_core::error::RepoError;
use quill_core::ports::{PostFilter, PostRepository, UserRepository};

/// In-memory user store with email/google_id uniqueness.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| {
                u.username
                    .as_deref()
                    .is_some_and(|n| n.eq_ignore_ascii_case(username))
            })
            .cloned())
    }

    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.google_id.as_deref() == Some(google_id))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, RepoError> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        // Write lock held for the whole check-and-insert, which is what
        // makes this the moral equivalent of the SQL unique constraints.
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("users_email_key".into()));
        }
        if let Some(gid) = &user.google_id {
            if users.values().any(|u| u.google_id.as_deref() == Some(gid)) {
                return Err(RepoError::Constraint("users_google_id_key".into()));
            }
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(RepoError::NotFound);
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

/// In-memory post store.
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(post: &Post, filter: &PostFilter) -> bool {
        filter.state.is_none_or(|s| post.state == s)
            && filter.author.as_deref().is_none_or(|a| post.author == a)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn find_page(
        &self,
        filter: &PostFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> = self
            .posts
            .read()
            .await
            .iter()
            .filter(|p| Self::matches(p, filter))
            .cloned()
            .collect();
        // Stable sort over reversed insertion order breaks created_at ties
        // newest-insertion-first, like the SQL backend's index scan.
        posts.reverse();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        Ok(self
            .posts
            .read()
            .await
            .iter()
            .filter(|p| Self::matches(p, filter))
            .count() as u64)
    }

    async fn search(&self, term: &str) -> Result<Vec<Post>, RepoError> {
        let term = term.to_lowercase();
        Ok(self
            .posts
            .read()
            .await
            .iter()
            .filter(|p| p.state == PostState::Published)
            .filter(|p| {
                p.author.to_lowercase().contains(&term) || p.title.to_lowercase().contains(&term)
            })
            .cloned()
            .collect())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        self.posts.write().await.push(post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        let slot = posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(RepoError::NotFound)?;
        *slot = post.clone();
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
