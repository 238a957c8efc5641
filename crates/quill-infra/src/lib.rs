//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! persistence, authentication primitives, object storage, and the Google
//! OAuth code-exchange client.
//!
//! ## Feature Flags
//!
//! - `full` (default) - everything enabled
//! - `minimal` - in-memory repositories and storage only
//! - `postgres` - PostgreSQL persistence via SeaORM
//! - `s3` - S3-compatible object storage for post images

pub mod auth;
pub mod database;
pub mod oauth;
pub mod storage;

// Re-exports - in-memory fallbacks
pub use database::{InMemoryPostRepository, InMemoryUserRepository};
pub use storage::InMemoryStorage;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use oauth::{GoogleOAuthClient, GoogleOAuthConfig};

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, PostgresPostRepository, PostgresUserRepository, connect};

#[cfg(feature = "s3")]
pub use storage::{S3Config, S3Storage};
