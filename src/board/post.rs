//! Post models for clubboard.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A stored post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Post {
    /// Post ID (UUID v4).
    pub id: String,
    /// Title.
    pub title: String,
    /// Body.
    pub content: String,
    /// Owner's user identifier.
    pub author_id: String,
    /// Number of successful reads.
    pub view_count: i64,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// A post joined with its author's nickname.
///
/// The nickname is `None` if the author row no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct PostWithAuthor {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author_id: String,
    pub author_nickname: Option<String>,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
}

impl PostWithAuthor {
    /// Check whether `user_id` owns this post.
    pub fn is_author(&self, user_id: &str) -> bool {
        self.author_id == user_id
    }
}

/// Data for creating a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Title.
    pub title: String,
    /// Body.
    pub content: String,
    /// Owner's user identifier.
    pub author_id: String,
}

impl NewPost {
    /// Create a new post draft.
    pub fn new(
        author_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author_id: author_id.into(),
        }
    }
}
