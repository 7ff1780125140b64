//! User model for clubboard.

use chrono::{DateTime, Utc};

/// User entity representing a registered member.
///
/// `password` and `session_id` must never leave the server; responses are
/// built from the other fields.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Login identifier chosen at registration.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Password digest.
    pub password: String,
    /// Optional phone number.
    pub phone_number: Option<String>,
    /// Email address.
    pub email: String,
    /// Nickname shown next to posts.
    pub nickname: String,
    /// Last successful login.
    pub last_login_at: Option<DateTime<Utc>>,
    /// Current session token.
    pub session_id: Option<String>,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check whether the account currently holds a session.
    pub fn has_session(&self) -> bool {
        self.session_id.is_some()
    }

    /// Check a presented session token against the stored one.
    pub fn session_matches(&self, token: &str) -> bool {
        matches!(&self.session_id, Some(stored) if stored == token)
    }
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Password digest (already hashed).
    pub password: String,
    /// Optional phone number.
    pub phone_number: Option<String>,
    /// Email address.
    pub email: String,
    /// Nickname.
    pub nickname: String,
}

impl NewUser {
    /// Create a new user with required fields.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
        nickname: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            password: password.into(),
            phone_number: None,
            email: email.into(),
            nickname: nickname.into(),
        }
    }

    /// Set the phone number.
    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_session(session_id: Option<&str>) -> User {
        User {
            id: "alice".to_string(),
            name: "Alice".to_string(),
            password: "hash".to_string(),
            phone_number: None,
            email: "alice@example.com".to_string(),
            nickname: "al".to_string(),
            last_login_at: None,
            session_id: session_id.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_session_matches() {
        let user = user_with_session(Some("token-1"));
        assert!(user.has_session());
        assert!(user.session_matches("token-1"));
        assert!(!user.session_matches("token-2"));
        assert!(!user.session_matches(""));
    }

    #[test]
    fn test_session_matches_without_session() {
        let user = user_with_session(None);
        assert!(!user.has_session());
        assert!(!user.session_matches("token-1"));
    }

    #[test]
    fn test_new_user_builder() {
        let user = NewUser::new("bob", "Bob", "digest", "bob@example.com", "bobby")
            .with_phone_number("010-1234-5678");
        assert_eq!(user.id, "bob");
        assert_eq!(user.name, "Bob");
        assert_eq!(user.password, "digest");
        assert_eq!(user.email, "bob@example.com");
        assert_eq!(user.nickname, "bobby");
        assert_eq!(user.phone_number.as_deref(), Some("010-1234-5678"));
    }
}
