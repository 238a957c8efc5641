//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{OAuthClient, ObjectStorage, PostRepository, TokenService, UserRepository};
use quill_core::service::{AuthService, PostService, UserService};
use quill_infra::auth::{Argon2PasswordService, JwtTokenService};
use quill_infra::{GoogleOAuthClient, InMemoryPostRepository, InMemoryStorage, InMemoryUserRepository};

use crate::config::AppConfig;

/// Shared application state: the three domain services plus the pieces the
/// middleware needs directly.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub posts: Arc<PostService>,
    pub users: Arc<UserService>,
    pub tokens: Arc<dyn TokenService>,
    pub oauth: Option<Arc<dyn OAuthClient>>,
}

impl AppState {
    /// Build the application state with the appropriate backing
    /// implementations for the configuration and compiled features.
    pub async fn new(config: &AppConfig) -> Self {
        let (user_repo, post_repo) = Self::repositories(config).await;
        let storage = Self::storage(config).await;

        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
        let oauth = config.google.clone().map(|google| {
            Arc::new(GoogleOAuthClient::new(google)) as Arc<dyn OAuthClient>
        });

        tracing::info!("Application state initialized");
        Self::assemble(user_repo, post_repo, storage, tokens, oauth)
    }

    /// Wire repositories, storage and token service into the services.
    /// Split out so tests can assemble a fully in-memory state.
    pub fn assemble(
        user_repo: Arc<dyn UserRepository>,
        post_repo: Arc<dyn PostRepository>,
        storage: Arc<dyn ObjectStorage>,
        tokens: Arc<dyn TokenService>,
        oauth: Option<Arc<dyn OAuthClient>>,
    ) -> Self {
        let auth = Arc::new(AuthService::new(
            user_repo.clone(),
            Arc::new(Argon2PasswordService::new()),
            tokens.clone(),
        ));
        let posts = Arc::new(PostService::new(post_repo, user_repo.clone(), storage));
        let users = Arc::new(UserService::new(user_repo));

        Self {
            auth,
            posts,
            users,
            tokens,
            oauth,
        }
    }

    #[cfg(feature = "postgres")]
    async fn repositories(config: &AppConfig) -> (Arc<dyn UserRepository>, Arc<dyn PostRepository>) {
        use quill_infra::{DatabaseConfig, PostgresPostRepository, PostgresUserRepository, connect};

        if let Some(url) = &config.database_url {
            let db_config = DatabaseConfig {
                url: url.clone(),
                max_connections: config.db_max_connections,
                min_connections: config.db_min_connections,
            };
            match connect(&db_config).await {
                Ok(conn) => {
                    return (
                        Arc::new(PostgresUserRepository::new(conn.clone())),
                        Arc::new(PostgresPostRepository::new(conn)),
                    );
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }
        Self::memory_repositories()
    }

    #[cfg(not(feature = "postgres"))]
    async fn repositories(
        _config: &AppConfig,
    ) -> (Arc<dyn UserRepository>, Arc<dyn PostRepository>) {
        tracing::info!("Running without postgres feature - using in-memory repositories");
        Self::memory_repositories()
    }

    fn memory_repositories() -> (Arc<dyn UserRepository>, Arc<dyn PostRepository>) {
        (
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryPostRepository::new()),
        )
    }

    #[cfg(feature = "s3")]
    async fn storage(config: &AppConfig) -> Arc<dyn ObjectStorage> {
        use quill_infra::{S3Config, S3Storage};

        if let Some(s3) = &config.s3 {
            let storage = S3Storage::new(&S3Config {
                endpoint: s3.endpoint.clone(),
                region: s3.region.clone(),
                bucket: s3.bucket.clone(),
                access_key: s3.access_key.clone(),
                secret_key: s3.secret_key.clone(),
            });
            storage.ensure_bucket_exists().await;
            return Arc::new(storage);
        }
        tracing::warn!("S3 not configured. Image uploads go to in-memory storage.");
        Arc::new(InMemoryStorage::new())
    }

    #[cfg(not(feature = "s3"))]
    async fn storage(_config: &AppConfig) -> Arc<dyn ObjectStorage> {
        tracing::info!("Running without s3 feature - using in-memory storage");
        Arc::new(InMemoryStorage::new())
    }
}
