//! In-memory fakes backing the service unit tests.
//!
//! These stay inside `quill-core` so the services can be tested without the
//! infrastructure crate; the production in-memory fallbacks live in
//! `quill-infra`.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Post, PostState, User};
use crate::error::RepoError;
use crate::ports::{
    AuthError, ObjectStorage, PasswordService, PostFilter, PostRepository, StorageError,
    TokenClaims, TokenService, UserRepository,
};

pub(crate) fn seed_user(username: &str) -> User {
    User::new_local(
        username.to_string(),
        format!("{}@example.com", username.to_lowercase()),
        format!("hashed:{username}"),
    )
}

#[derive(Default)]
pub(crate) struct MemoryUsers {
    users: Mutex<Vec<User>>,
}

impl MemoryUsers {
    pub(crate) fn seed(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    pub(crate) fn id_of(&self, username: &str) -> Option<Uuid> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username.as_deref() == Some(username))
            .map(|u| u.id)
    }
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
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
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.google_id.as_deref() == Some(google_id))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("users_email_key".into()));
        }
        if let Some(gid) = &user.google_id {
            if users.iter().any(|u| u.google_id.as_deref() == Some(gid)) {
                return Err(RepoError::Constraint("users_google_id_key".into()));
            }
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.lock().unwrap();
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(RepoError::NotFound)?;
        *slot = user.clone();
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct MemoryPosts {
    posts: Mutex<Vec<Post>>,
}

impl MemoryPosts {
    pub(crate) fn len(&self) -> usize {
        self.posts.lock().unwrap().len()
    }

    fn matching(&self, filter: &PostFilter) -> Vec<Post> {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| filter.state.is_none_or(|s| p.state == s))
            .filter(|p| filter.author.as_deref().is_none_or(|a| p.author == a))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl PostRepository for MemoryPosts {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn find_page(
        &self,
        filter: &PostFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let mut posts = self.matching(filter);
        // Reverse insertion order first so a stable sort breaks created_at
        // ties newest-insertion-first.
        posts.reverse();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        Ok(self.matching(filter).len() as u64)
    }

    async fn search(&self, term: &str) -> Result<Vec<Post>, RepoError> {
        let term = term.to_lowercase();
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.state == PostState::Published)
            .filter(|p| {
                p.author.to_lowercase().contains(&term) || p.title.to_lowercase().contains(&term)
            })
            .cloned()
            .collect())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let slot = posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(RepoError::NotFound)?;
        *slot = post.clone();
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct MemoryStorage {
    uploads: AtomicUsize,
    fail_next: AtomicBool,
}

impl MemoryStorage {
    pub(crate) fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn upload(&self, _bytes: Vec<u8>, _content_type: &str) -> Result<String, StorageError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(StorageError::Upload("storage unavailable".into()));
        }
        let n = self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(format!("https://img.test/{n}"))
    }
}

/// Token fake: the token is the user id behind a fixed prefix.
pub(crate) struct FakeTokens;

impl TokenService for FakeTokens {
    fn generate_token(&self, user_id: Uuid) -> Result<String, AuthError> {
        Ok(format!("tok:{user_id}"))
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let id = token
            .strip_prefix("tok:")
            .and_then(|s| Uuid::parse_str(s).ok())
            .ok_or_else(|| AuthError::InvalidToken("bad fake token".into()))?;
        Ok(TokenClaims {
            user_id: id,
            exp: Utc::now().timestamp() + 3600,
        })
    }

    fn expiration_seconds(&self) -> i64 {
        3600
    }
}

/// Password fake: "hashing" is a reversible prefix, verification a string
/// compare.
pub(crate) struct PlainPasswords;

impl PasswordService for PlainPasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("hashed:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(hash == format!("hashed:{password}"))
    }
}
