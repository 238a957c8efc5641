//! Google OAuth 2.0 authorization-code client.
//!
//! The callback handler exchanges the code here and hands the resulting
//! profile to the authentication service; there is no session registry and
//! no provider SDK, just the two documented HTTP calls.

use async_trait::async_trait;
use serde::Deserialize;

use quill_core::ports::{OAuthClient, OAuthError, OAuthProfile};

const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

#[derive(Debug, Clone)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
}

pub struct GoogleOAuthClient {
    config: GoogleOAuthConfig,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl GoogleOAuthClient {
    pub fn new(config: GoogleOAuthConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl OAuthClient for GoogleOAuthClient {
    fn authorize_url(&self, state: &str) -> String {
        format!(
            "{AUTH_ENDPOINT}?client_id={}&redirect_uri={}&response_type=code&scope=profile%20email&state={}",
            self.config.client_id, self.config.redirect_url, state
        )
    }

    async fn exchange_code(&self, code: &str) -> Result<OAuthProfile, OAuthError> {
        let token: TokenResponse = self
            .http
            .post(TOKEN_ENDPOINT)
            .form(&[
                ("code", code),
                ("client_id", &self.config.client_id),
                ("client_secret", &self.config.client_secret),
                ("redirect_uri", &self.config.redirect_url),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| OAuthError::Exchange(e.to_string()))?
            .error_for_status()
            .map_err(|e| OAuthError::Exchange(e.to_string()))?
            .json()
            .await
            .map_err(|e| OAuthError::Exchange(e.to_string()))?;

        let info: UserInfo = self
            .http
            .get(USERINFO_ENDPOINT)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| OAuthError::Exchange(e.to_string()))?
            .error_for_status()
            .map_err(|e| OAuthError::Exchange(e.to_string()))?
            .json()
            .await
            .map_err(|e| OAuthError::Exchange(e.to_string()))?;

        let email = info
            .email
            .ok_or_else(|| OAuthError::Profile("account has no email".into()))?;

        Ok(OAuthProfile {
            provider_id: info.id,
            display_name: info.name.unwrap_or_else(|| email.clone()),
            email,
        })
    }
}
