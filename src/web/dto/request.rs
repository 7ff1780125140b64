//! Request DTOs for the HTTP API.
//!
//! Missing string fields deserialize as empty so they surface as
//! validation errors rather than body rejections.

use serde::Deserialize;

use crate::auth::RegistrationRequest;

/// Member registration request.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub nickname: String,
}

impl From<RegisterRequest> for RegistrationRequest {
    fn from(req: RegisterRequest) -> Self {
        RegistrationRequest {
            id: req.id,
            name: req.name,
            password: req.password,
            confirm_password: req.confirm_password,
            phone_number: req.phone_number,
            email: req.email,
            nickname: req.nickname,
        }
    }
}

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// User identifier.
    #[serde(default)]
    pub id: String,
    /// Password.
    #[serde(default)]
    pub password: String,
}

/// Create or update post request.
#[derive(Debug, Deserialize)]
pub struct PostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Query parameters for listing posts.
#[derive(Debug, Default, Deserialize)]
pub struct ListPostsQuery {
    /// Page number (1-based).
    pub page: Option<i64>,
    /// Items per page.
    #[serde(rename = "pageSize")]
    pub page_size: Option<i64>,
}
