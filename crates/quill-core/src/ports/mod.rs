//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod oauth;
mod repository;
mod storage;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use oauth::{OAuthClient, OAuthError, OAuthProfile};
pub use repository::{PostFilter, PostRepository, UserRepository};
pub use storage::{ObjectStorage, StorageError};
