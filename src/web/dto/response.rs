//! Response DTOs for the HTTP API.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::board::{PaginatedResult, Post, PostWithAuthor};
use crate::db::User;

/// Status message, with a success flag where the endpoint reports one.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub message: String,
}

impl MessageResponse {
    /// Message with `success: true`.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: Some(true),
            message: message.into(),
        }
    }

    /// Message only.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: None,
            message: message.into(),
        }
    }
}

/// Public view of a user. Never carries the digest or session token.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub phone_number: Option<String>,
    pub email: String,
    pub nickname: String,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            phone_number: user.phone_number.clone(),
            email: user.email.clone(),
            nickname: user.nickname.clone(),
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}

/// Login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub user: UserInfo,
}

/// Current user response.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub success: bool,
    pub user: UserInfo,
}

/// One page of posts.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    pub data: Vec<PostWithAuthor>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl From<PaginatedResult<PostWithAuthor>> for PostListResponse {
    fn from(result: PaginatedResult<PostWithAuthor>) -> Self {
        let total_pages = result.total_pages();
        Self {
            data: result.items,
            total: result.total,
            page: result.page,
            page_size: result.page_size,
            total_pages,
        }
    }
}

/// Single post response.
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub post: PostWithAuthor,
}

/// Response to a successful post creation.
#[derive(Debug, Serialize)]
pub struct CreatePostResponse {
    pub success: bool,
    pub message: String,
    pub post: Post,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "alice".to_string(),
            name: "Alice".to_string(),
            password: "digest".to_string(),
            phone_number: None,
            email: "alice@example.com".to_string(),
            nickname: "al".to_string(),
            last_login_at: None,
            session_id: Some("secret-token".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_user_info_hides_secrets() {
        let json = serde_json::to_value(UserInfo::from(&user())).unwrap();
        assert_eq!(json["id"], "alice");
        assert_eq!(json["nickname"], "al");
        assert!(json.get("password").is_none());
        assert!(json.get("session_id").is_none());
        let text = json.to_string();
        assert!(!text.contains("secret-token"));
        assert!(!text.contains("digest"));
    }

    #[test]
    fn test_message_response_shapes() {
        let json = serde_json::to_value(MessageResponse::success("ok")).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "ok");

        let json = serde_json::to_value(MessageResponse::message("ok")).unwrap();
        assert!(json.get("success").is_none());
    }

    #[test]
    fn test_post_list_response_keys() {
        let result: PaginatedResult<PostWithAuthor> = PaginatedResult {
            items: vec![],
            total: 11,
            page: 1,
            page_size: 10,
        };
        let json = serde_json::to_value(PostListResponse::from(result)).unwrap();
        assert_eq!(json["total"], 11);
        assert_eq!(json["pageSize"], 10);
        assert_eq!(json["totalPages"], 2);
        assert!(json["data"].as_array().unwrap().is_empty());
    }
}
