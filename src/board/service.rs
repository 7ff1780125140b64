//! Post service for clubboard.
//!
//! This module provides the post lifecycle (create, read, update, delete,
//! list) with ownership checks, content validation and pagination.

use tracing::info;

use crate::auth::{require_owner, require_user};
use crate::config::BoardConfig;
use crate::db::{DbPool, User};
use crate::{BoardError, Result};

use super::post::{NewPost, Post, PostWithAuthor};
use super::repository::PostRepository;

/// Validate a title string.
fn validate_title(title: &str, max: usize) -> Result<()> {
    if title.trim().is_empty() {
        return Err(BoardError::Validation("title is required".to_string()));
    }
    if title.chars().count() > max {
        return Err(BoardError::Validation(format!(
            "title must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Validate a post body string.
fn validate_content(content: &str, max: usize) -> Result<()> {
    if content.trim().is_empty() {
        return Err(BoardError::Validation("content is required".to_string()));
    }
    if content.chars().count() > max {
        return Err(BoardError::Validation(format!(
            "content must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Page-numbered pagination parameters (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number, starting at 1.
    pub page: i64,
    /// Items per page.
    pub page_size: i64,
}

impl Pagination {
    /// Create pagination parameters, rejecting values below 1.
    pub fn new(page: i64, page_size: i64) -> Result<Self> {
        if page < 1 || page_size < 1 {
            return Err(BoardError::Validation("invalid page parameters".to_string()));
        }
        Ok(Self { page, page_size })
    }

    /// Build from optional query values, applying defaults and the size cap.
    pub fn from_query(page: Option<i64>, page_size: Option<i64>, config: &BoardConfig) -> Result<Self> {
        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(i64::from(config.default_page_size));
        let pagination = Self::new(page, page_size)?;
        Ok(Self {
            page_size: pagination.page_size.min(i64::from(config.max_page_size)),
            ..pagination
        })
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> Result<i64> {
        (self.page - 1)
            .checked_mul(self.page_size)
            .ok_or_else(|| BoardError::Validation("page is out of range".to_string()))
    }
}

/// Result of a paginated query.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Total number of items (across all pages).
    pub total: i64,
    /// Current page.
    pub page: i64,
    /// Page size used for this query.
    pub page_size: i64,
}

impl<T> PaginatedResult<T> {
    /// Total number of pages, `ceil(total / page_size)`.
    pub fn total_pages(&self) -> i64 {
        if self.page_size <= 0 {
            return 0;
        }
        (self.total + self.page_size - 1) / self.page_size
    }
}

/// Service for post operations with ownership checking.
pub struct PostService<'a> {
    pool: &'a DbPool,
    config: &'a BoardConfig,
}

impl<'a> PostService<'a> {
    /// Create a new PostService.
    pub fn new(pool: &'a DbPool, config: &'a BoardConfig) -> Self {
        Self { pool, config }
    }

    fn repo(&self) -> PostRepository<'a> {
        PostRepository::new(self.pool)
    }

    /// Create a post owned by `requester`.
    pub async fn create(
        &self,
        requester: Option<&User>,
        title: &str,
        content: &str,
    ) -> Result<Post> {
        let user = require_user(requester)?;
        validate_title(title, self.config.max_title_length)?;
        validate_content(content, self.config.max_content_length)?;

        let post = self
            .repo()
            .create(&NewPost::new(&user.id, title, content))
            .await?;

        info!(post_id = %post.id, author_id = %user.id, "Post created");
        Ok(post)
    }

    /// Read a post, counting the view.
    ///
    /// Every successful read increments the counter; the returned post
    /// already includes this read.
    pub async fn read(&self, id: &str) -> Result<PostWithAuthor> {
        let repo = self.repo();
        if !repo.increment_view_count(id).await? {
            return Err(BoardError::NotFound("post".to_string()));
        }
        repo.get_with_author(id)
            .await?
            .ok_or_else(|| BoardError::NotFound("post".to_string()))
    }

    /// Check that `requester` may edit or delete post `id`.
    ///
    /// Fails with `Unauthenticated`, then `NotFound`, then `Forbidden`.
    pub async fn check_mutation(&self, requester: Option<&User>, id: &str) -> Result<Post> {
        require_user(requester)?;
        let post = self
            .repo()
            .get_by_id(id)
            .await?
            .ok_or_else(|| BoardError::NotFound("post".to_string()))?;
        require_owner(&post.author_id, requester)?;
        Ok(post)
    }

    /// Replace title and content of a post.
    ///
    /// Checks run in order: authenticated, exists, owned, valid.
    pub async fn update(
        &self,
        requester: Option<&User>,
        id: &str,
        title: &str,
        content: &str,
    ) -> Result<()> {
        let post = self.check_mutation(requester, id).await?;
        validate_title(title, self.config.max_title_length)?;
        validate_content(content, self.config.max_content_length)?;

        if !self.repo().update_content(id, title, content).await? {
            return Err(BoardError::NotFound("post".to_string()));
        }

        info!(post_id = %id, author_id = %post.author_id, "Post updated");
        Ok(())
    }

    /// Delete a post.
    pub async fn delete(&self, requester: Option<&User>, id: &str) -> Result<()> {
        let post = self.check_mutation(requester, id).await?;

        if !self.repo().delete(id).await? {
            return Err(BoardError::NotFound("post".to_string()));
        }

        info!(post_id = %id, author_id = %post.author_id, "Post deleted");
        Ok(())
    }

    /// List posts newest first.
    pub async fn list(&self, pagination: Pagination) -> Result<PaginatedResult<PostWithAuthor>> {
        let repo = self.repo();
        let offset = pagination.offset()?;
        let items = repo.list_with_author(offset, pagination.page_size).await?;
        let total = repo.count().await?;

        Ok(PaginatedResult {
            items,
            total,
            page: pagination.page,
            page_size: pagination.page_size,
        })
    }
}
