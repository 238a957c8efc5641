use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - a registered author, local or Google-backed.
///
/// Email is globally unique. A locally registered user always carries a
/// password hash; a user created through Google OAuth carries a `google_id`
/// instead and may never set a password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub google_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a locally registered user.
    pub fn new_local(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            username: Some(username),
            password_hash: Some(password_hash),
            google_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a user from a Google OAuth profile. The provider's display
    /// name doubles as the username; there is no local password.
    pub fn new_google(google_id: String, display_name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            username: Some(display_name),
            password_hash: None,
            google_id: Some(google_id),
            created_at: now,
            updated_at: now,
        }
    }
}
