//! User admin operations - thin CRUD over the user repository.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::User;
use crate::error::{DomainError, RepoError};
use crate::ports::UserRepository;

/// Partial profile update; absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
}

pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.users.list().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound { entity: "user" })
    }

    /// Update username and/or email. An email change re-checks uniqueness.
    pub async fn update(&self, id: Uuid, patch: UserPatch) -> Result<User, DomainError> {
        let mut user = self.get(id).await?;

        if let Some(email) = patch.email {
            let email = email.trim().to_string();
            if !email.contains('@') {
                return Err(DomainError::InvalidInput("invalid email address".into()));
            }
            if let Some(existing) = self.users.find_by_email(&email).await? {
                if existing.id != id {
                    return Err(DomainError::DuplicateEmail);
                }
            }
            user.email = email;
        }
        if let Some(username) = patch.username {
            let username = username.trim().to_string();
            if username.is_empty() {
                return Err(DomainError::InvalidInput("username cannot be empty".into()));
            }
            user.username = Some(username);
        }
        user.updated_at = Utc::now();

        match self.users.update(user).await {
            Ok(user) => Ok(user),
            Err(RepoError::Constraint(_)) => Err(DomainError::DuplicateEmail),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        // Load first so a missing user reports NotFound, not a bare repo error.
        self.get(id).await?;
        Ok(self.users.delete(id).await?)
    }
}
