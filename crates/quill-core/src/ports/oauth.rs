//! External identity provider port.
//!
//! The HTTP callback hands the authorization code to this client, which
//! exchanges it for profile data; the authentication service then bridges
//! the profile to a local user record. No process-wide session registry is
//! involved.

use async_trait::async_trait;

/// Profile data returned by the provider after a successful code exchange.
#[derive(Debug, Clone)]
pub struct OAuthProfile {
    pub provider_id: String,
    pub display_name: String,
    pub email: String,
}

#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    #[error("Code exchange failed: {0}")]
    Exchange(String),

    #[error("Provider returned no usable profile: {0}")]
    Profile(String),
}

/// OAuth authorization-code client.
#[async_trait]
pub trait OAuthClient: Send + Sync {
    /// URL the browser is redirected to for consent.
    fn authorize_url(&self, state: &str) -> String;

    /// Exchange an authorization code for the provider profile.
    async fn exchange_code(&self, code: &str) -> Result<OAuthProfile, OAuthError>;
}
