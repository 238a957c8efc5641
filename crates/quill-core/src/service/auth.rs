//! Authentication service - local credentials, bearer tokens, and the
//! Google identity bridge.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::User;
use crate::error::{DomainError, RepoError};
use crate::ports::{PasswordService, TokenService, UserRepository};

/// Minimum accepted password length for local registration.
const MIN_PASSWORD_LEN: usize = 8;

/// Issues and validates signed, time-limited credentials and bridges
/// external-provider identities to local user records. Handlers receive an
/// explicit instance; there is no process-wide session registry.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Register a local user with a salted password hash.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, DomainError> {
        let username = username.trim();
        let email = email.trim();

        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(DomainError::InvalidInput(
                "username, email and password are required".into(),
            ));
        }
        if !email.contains('@') {
            return Err(DomainError::InvalidInput("invalid email address".into()));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::InvalidInput(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        if self.users.find_by_email(email).await?.is_some() {
            return Err(DomainError::DuplicateEmail);
        }

        let password_hash = self
            .passwords
            .hash(password)
            .map_err(|e| DomainError::Unexpected(e.to_string()))?;

        let user = User::new_local(username.to_string(), email.to_string(), password_hash);

        // The pre-check above races with concurrent registrations; the
        // unique constraint on email settles it.
        match self.users.insert(user).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "user registered");
                Ok(user)
            }
            Err(RepoError::Constraint(_)) => Err(DomainError::DuplicateEmail),
            Err(e) => Err(e.into()),
        }
    }

    /// Login with email and password. Unknown email and wrong password both
    /// fail with `InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), DomainError> {
        let user = self
            .users
            .find_by_email(email.trim())
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        // Google-only accounts have no hash and cannot login locally.
        let hash = user
            .password_hash
            .as_deref()
            .ok_or(DomainError::InvalidCredentials)?;

        let valid = self
            .passwords
            .verify(password, hash)
            .map_err(|e| DomainError::Unexpected(e.to_string()))?;
        if !valid {
            return Err(DomainError::InvalidCredentials);
        }

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    /// Validate a bearer token and resolve it to a live user record.
    pub async fn verify_token(&self, token: &str) -> Result<User, DomainError> {
        let claims = self
            .tokens
            .validate_token(token)
            .map_err(|_| DomainError::InvalidToken)?;

        self.resolve_user(claims.user_id).await
    }

    /// Resolve already-validated claims to a live user record. Fails with
    /// `UserNotFound` when the token outlived the account.
    pub async fn resolve_user(&self, user_id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)
    }

    /// Find-or-create a user for a Google identity; idempotent per provider
    /// id. A concurrent first login loses the insert to the uniqueness
    /// constraint on `google_id` and returns the winner's record.
    pub async fn oauth_login(
        &self,
        provider_id: &str,
        display_name: &str,
        email: &str,
    ) -> Result<(User, String), DomainError> {
        if let Some(user) = self.users.find_by_google_id(provider_id).await? {
            let token = self.issue_token(&user)?;
            return Ok((user, token));
        }

        let user = User::new_google(
            provider_id.to_string(),
            display_name.to_string(),
            email.to_string(),
        );

        let user = match self.users.insert(user).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "user created via google oauth");
                user
            }
            Err(RepoError::Constraint(_)) => {
                tracing::debug!("lost concurrent oauth signup, re-reading");
                self.users
                    .find_by_google_id(provider_id)
                    .await?
                    .ok_or_else(|| {
                        DomainError::Unexpected("oauth user vanished after constraint hit".into())
                    })?
            }
            Err(e) => return Err(e.into()),
        };

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    pub fn token_lifetime_seconds(&self) -> i64 {
        self.tokens.expiration_seconds()
    }

    /// Issue a fresh token for an already-authenticated user.
    pub fn issue_token(&self, user: &User) -> Result<String, DomainError> {
        self.tokens
            .generate_token(user.id)
            .map_err(|e| DomainError::Unexpected(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::{FakeTokens, MemoryUsers, PlainPasswords};

    fn service() -> AuthService {
        AuthService::new(
            Arc::new(MemoryUsers::default()),
            Arc::new(PlainPasswords),
            Arc::new(FakeTokens),
        )
    }

    #[tokio::test]
    async fn register_then_login_round_trips() {
        let svc = service();
        let user = svc
            .register("blard", "blard@example.com", "hunter2hunter2")
            .await
            .unwrap();
        assert_eq!(user.username.as_deref(), Some("blard"));
        assert!(user.password_hash.is_some());

        let (logged_in, token) = svc
            .login("blard@example.com", "hunter2hunter2")
            .await
            .unwrap();
        assert_eq!(logged_in.id, user.id);

        let verified = svc.verify_token(&token).await.unwrap();
        assert_eq!(verified.id, user.id);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_once() {
        let svc = service();
        svc.register("a", "dup@example.com", "passwordpassword")
            .await
            .unwrap();
        let err = svc
            .register("b", "dup@example.com", "passwordpassword")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateEmail));
    }

    #[tokio::test]
    async fn unknown_email_and_bad_password_fail_alike() {
        let svc = service();
        svc.register("a", "a@example.com", "passwordpassword")
            .await
            .unwrap();

        let unknown = svc.login("nobody@example.com", "whatever").await.unwrap_err();
        let wrong = svc.login("a@example.com", "wrong-password").await.unwrap_err();
        assert!(matches!(unknown, DomainError::InvalidCredentials));
        assert!(matches!(wrong, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn missing_fields_are_invalid_input() {
        let svc = service();
        for (u, e, p) in [
            ("", "a@example.com", "passwordpassword"),
            ("a", "", "passwordpassword"),
            ("a", "a@example.com", ""),
            ("a", "not-an-email", "passwordpassword"),
        ] {
            assert!(matches!(
                svc.register(u, e, p).await.unwrap_err(),
                DomainError::InvalidInput(_)
            ));
        }
    }

    #[tokio::test]
    async fn garbage_token_is_invalid() {
        let svc = service();
        assert!(matches!(
            svc.verify_token("not-a-token").await.unwrap_err(),
            DomainError::InvalidToken
        ));
    }

    #[tokio::test]
    async fn valid_token_for_deleted_user_is_user_not_found() {
        let users = Arc::new(MemoryUsers::default());
        let svc = AuthService::new(users.clone(), Arc::new(PlainPasswords), Arc::new(FakeTokens));
        let user = svc
            .register("ghost", "ghost@example.com", "passwordpassword")
            .await
            .unwrap();
        let (_, token) = svc
            .login("ghost@example.com", "passwordpassword")
            .await
            .unwrap();

        users.delete(user.id).await.unwrap();

        assert!(matches!(
            svc.verify_token(&token).await.unwrap_err(),
            DomainError::UserNotFound
        ));
    }

    #[tokio::test]
    async fn oauth_login_is_idempotent_per_provider_id() {
        let svc = service();
        let (first, _) = svc
            .oauth_login("google-123", "Ada", "ada@example.com")
            .await
            .unwrap();
        let (second, _) = svc
            .oauth_login("google-123", "Ada", "ada@example.com")
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.google_id.as_deref(), Some("google-123"));
        assert!(first.password_hash.is_none());
    }

    #[tokio::test]
    async fn oauth_user_cannot_login_locally() {
        let svc = service();
        svc.oauth_login("google-9", "Eve", "eve@example.com")
            .await
            .unwrap();
        assert!(matches!(
            svc.login("eve@example.com", "anything").await.unwrap_err(),
            DomainError::InvalidCredentials
        ));
    }
}
