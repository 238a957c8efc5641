//! Application configuration loaded from environment variables.

use std::env;

use quill_infra::{GoogleOAuthConfig, JwtConfig};

/// S3 settings as read from the environment; converted into the storage
/// client's config only when the `s3` feature is compiled in.
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub endpoint: String,
    pub region: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub jwt: JwtConfig,
    pub google: Option<GoogleOAuthConfig>,
    pub s3: Option<S3Settings>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database_url: env::var("DATABASE_URL").ok(),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            db_min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            jwt: Self::jwt_from_env(),
            google: Self::google_from_env(),
            s3: Self::s3_from_env(),
        }
    }

    fn jwt_from_env() -> JwtConfig {
        let defaults = JwtConfig::default();
        let secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            defaults.secret.clone()
        });

        JwtConfig {
            secret,
            expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.expiration_hours),
            issuer: env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        }
    }

    /// Google OAuth is optional; with any of the three variables missing the
    /// OAuth routes answer 503.
    fn google_from_env() -> Option<GoogleOAuthConfig> {
        Some(GoogleOAuthConfig {
            client_id: env::var("GOOGLE_CLIENT_ID").ok()?,
            client_secret: env::var("GOOGLE_CLIENT_SECRET").ok()?,
            redirect_url: env::var("GOOGLE_REDIRECT_URL").ok()?,
        })
    }

    fn s3_from_env() -> Option<S3Settings> {
        Some(S3Settings {
            endpoint: env::var("S3_ENDPOINT").ok()?,
            region: env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            bucket: env::var("S3_BUCKET").ok()?,
            access_key: env::var("S3_ACCESS_KEY").ok()?,
            secret_key: env::var("S3_SECRET_KEY").ok()?,
        })
    }
}
