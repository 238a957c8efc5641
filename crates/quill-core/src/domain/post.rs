use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Words-per-minute base for the derived reading time.
const WORDS_PER_MINUTE: usize = 200;

/// Lifecycle state of a post. Only published posts are searchable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostState {
    Draft,
    Published,
}

impl PostState {
    pub fn as_str(self) -> &'static str {
        match self {
            PostState::Draft => "draft",
            PostState::Published => "published",
        }
    }
}

impl fmt::Display for PostState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostState::Draft),
            "published" => Ok(PostState::Published),
            other => Err(DomainError::InvalidState(other.to_string())),
        }
    }
}

/// Post entity - a blog article.
///
/// `author` is the author's username as recorded at creation, not a foreign
/// key; ownership checks compare it case-insensitively. `read_time` is
/// derived from the content at creation and never user-supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: String,
    pub author: String,
    pub state: PostState,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub read_time: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new draft post. Publishing is a separate explicit action.
    pub fn new(
        author: String,
        title: String,
        content: String,
        category: String,
        tags: Vec<String>,
        image_url: Option<String>,
    ) -> Self {
        let now = Utc::now();
        let read_time = estimate_read_time(&content);
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            category,
            author,
            state: PostState::Draft,
            image_url,
            tags,
            read_time,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Estimated reading time in whole minutes: word count over 200, rounded
/// up, never below one minute.
pub fn estimate_read_time(content: &str) -> i32 {
    let words = content.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1) as i32
}
