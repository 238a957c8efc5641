//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to register a local user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request to login with local credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request to verify a bearer token out-of-band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyTokenRequest {
    pub token: String,
}

/// A user's public profile. Password hashes never appear on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: Option<String>,
    pub email: String,
    pub google_linked: bool,
    pub created_at: DateTime<Utc>,
}

/// Successful authentication: the bearer token plus the user it names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

/// A blog post on the wire; `state` is `"draft"` or `"published"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: String,
    pub author: String,
    pub state: String,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub read_time: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One page of posts. `skip` in the query is a page index; the first page
/// is `current_page = 1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPageResponse {
    pub total: u64,
    pub total_pages: u64,
    pub current_page: u64,
    pub posts: Vec<PostResponse>,
}

/// Query string for `GET /posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostsQuery {
    pub state: Option<String>,
    pub author: Option<String>,
    /// Page index, not a record offset.
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

/// Query string for `GET /posts/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    pub term: String,
}

/// Body for `PATCH /posts/{id}/state`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetStateRequest {
    pub state: String,
}

/// Body for `PUT /users/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Tags as accepted at the input boundary: either an ordered list or a
/// single comma-separated string. The string form is split on commas and
/// trimmed; no other coercion happens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagInput {
    List(Vec<String>),
    Csv(String),
}

impl TagInput {
    /// Interpret a raw multipart text field: a JSON array if it looks like
    /// one, otherwise the comma-separated form.
    pub fn parse_str(raw: &str) -> Self {
        if raw.trim_start().starts_with('[') {
            if let Ok(tags) = serde_json::from_str::<Vec<String>>(raw) {
                return TagInput::List(tags);
            }
        }
        TagInput::Csv(raw.to_string())
    }

    pub fn into_tags(self) -> Vec<String> {
        match self {
            TagInput::List(tags) => tags
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            TagInput::Csv(s) => s
                .split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }
}

impl Default for TagInput {
    fn default() -> Self {
        TagInput::List(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_tags_split_on_commas_and_trim() {
        let tags = TagInput::Csv("rust, web , , api".into()).into_tags();
        assert_eq!(tags, vec!["rust", "web", "api"]);
    }

    #[test]
    fn list_tags_keep_their_order() {
        let tags = TagInput::List(vec!["b".into(), "a".into()]).into_tags();
        assert_eq!(tags, vec!["b", "a"]);
    }

    #[test]
    fn raw_field_parsing_accepts_json_arrays_and_csv() {
        assert_eq!(
            TagInput::parse_str(r#"["rust","web"]"#).into_tags(),
            vec!["rust", "web"]
        );
        assert_eq!(TagInput::parse_str("rust,web").into_tags(), vec!["rust", "web"]);
        // A malformed array falls back to the csv reading.
        assert_eq!(
            TagInput::parse_str("[not json").into_tags(),
            vec!["[not json"]
        );
    }

    #[test]
    fn untagged_deserialization_accepts_both_forms() {
        let from_list: TagInput = serde_json::from_str(r#"["x","y"]"#).unwrap();
        assert_eq!(from_list.into_tags(), vec!["x", "y"]);

        let from_csv: TagInput = serde_json::from_str(r#""x,y""#).unwrap();
        assert_eq!(from_csv.into_tags(), vec!["x", "y"]);
    }
}
