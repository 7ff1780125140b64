//! Board module for clubboard.
//!
//! Posts, their storage and the service enforcing ownership and pagination.

mod post;
mod repository;
mod service;

pub use post::{NewPost, Post, PostWithAuthor};
pub use repository::PostRepository;
pub use service::{PaginatedResult, Pagination, PostService};
