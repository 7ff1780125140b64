//! Post repository for clubboard.
//!
//! This module provides CRUD operations for posts in the database.

use chrono::Utc;
use uuid::Uuid;

use super::post::{NewPost, Post, PostWithAuthor};
use crate::db::DbPool;
use crate::{BoardError, Result};

const POST_COLUMNS: &str = "id, title, content, author_id, view_count, created_at";

const POST_WITH_AUTHOR_SELECT: &str =
    "SELECT p.id, p.title, p.content, p.author_id, u.nickname AS author_nickname,
            p.view_count, p.created_at
     FROM posts p
     LEFT JOIN users u ON p.author_id = u.id";

/// Repository for post CRUD operations.
pub struct PostRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> PostRepository<'a> {
    /// Create a new PostRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a new post with a fresh UUID and a zero view count.
    pub async fn create(&self, new_post: &NewPost) -> Result<Post> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO posts (id, title, content, author_id, view_count, created_at)
             VALUES (?, ?, ?, ?, 0, ?)",
        )
        .bind(&id)
        .bind(&new_post.title)
        .bind(&new_post.content)
        .bind(&new_post.author_id)
        .bind(Utc::now())
        .execute(self.pool)
        .await?;

        self.get_by_id(&id)
            .await?
            .ok_or_else(|| BoardError::NotFound("post".to_string()))
    }

    /// Get a post by ID.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Post>> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?");
        let post = sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(post)
    }

    /// Get a post with its author's nickname.
    pub async fn get_with_author(&self, id: &str) -> Result<Option<PostWithAuthor>> {
        let sql = format!("{POST_WITH_AUTHOR_SELECT} WHERE p.id = ?");
        let post = sqlx::query_as::<_, PostWithAuthor>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(post)
    }

    /// List posts newest first.
    ///
    /// Posts created in the same instant come back in reverse insertion order.
    pub async fn list_with_author(&self, offset: i64, limit: i64) -> Result<Vec<PostWithAuthor>> {
        let sql = format!(
            "{POST_WITH_AUTHOR_SELECT} ORDER BY p.created_at DESC, p.rowid DESC LIMIT ? OFFSET ?"
        );
        let posts = sqlx::query_as::<_, PostWithAuthor>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool)
            .await?;
        Ok(posts)
    }

    /// Count all posts.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Add one to the view counter in a single statement.
    ///
    /// Returns false if the post does not exist.
    pub async fn increment_view_count(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE posts SET view_count = view_count + 1 WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Overwrite title and content in place.
    ///
    /// Owner, view count and creation time are left untouched.
    pub async fn update_content(&self, id: &str, title: &str, content: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE posts SET title = ?, content = ? WHERE id = ?")
            .bind(title)
            .bind(content)
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a post by ID.
    ///
    /// Returns true if a post was deleted, false if not found.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
