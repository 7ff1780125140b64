//! User repository for clubboard.
//!
//! CRUD access to the `users` relation, including the single-statement
//! session token writes the session manager relies on.

use chrono::{DateTime, Utc};

use super::user::{NewUser, User};
use super::DbPool;
use crate::{BoardError, Result};

const USER_COLUMNS: &str = "id, name, password, phone_number, email, nickname,
                            last_login_at, session_id, created_at";

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a new user.
    ///
    /// Returns `BoardError::Duplicate` when the identifier is taken.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        sqlx::query(
            "INSERT INTO users (id, name, password, phone_number, email, nickname, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&new_user.id)
        .bind(&new_user.name)
        .bind(&new_user.password)
        .bind(&new_user.phone_number)
        .bind(&new_user.email)
        .bind(&new_user.nickname)
        .bind(Utc::now())
        .execute(self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                BoardError::Duplicate("user id".to_string())
            }
            other => BoardError::Database(other.to_string()),
        })?;

        self.get_by_id(&new_user.id)
            .await?
            .ok_or_else(|| BoardError::NotFound("user".to_string()))
    }

    /// Get a user by identifier (exact, case-sensitive match).
    pub async fn get_by_id(&self, id: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// Check whether an identifier is already registered.
    pub async fn exists(&self, id: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(self.pool)
            .await?;
        Ok(count > 0)
    }

    /// Store a new session token and login timestamp in one statement.
    ///
    /// Any previous token is overwritten. Returns false if the user is gone.
    pub async fn set_session(&self, id: &str, token: &str, at: DateTime<Utc>) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET session_id = ?, last_login_at = ? WHERE id = ?")
            .bind(token)
            .bind(at)
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Clear the session token.
    ///
    /// Returns true only if a token was actually cleared.
    pub async fn clear_session(&self, id: &str) -> Result<bool> {
        let result =
            sqlx::query("UPDATE users SET session_id = NULL WHERE id = ? AND session_id IS NOT NULL")
                .bind(id)
                .execute(self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace the stored password digest.
    pub async fn update_password(&self, id: &str, digest: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET password = ? WHERE id = ?")
            .bind(digest)
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
