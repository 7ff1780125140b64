//! clubboard - a membership-gated discussion board.
//!
//! Members register, log in with a cookie session and publish posts that
//! only their author may edit or delete.

pub mod auth;
pub mod board;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use auth::{
    can_mutate, legacy_digest, register, ClientToken, Hasher, PasswordError, RegistrationError,
    RegistrationRequest, SessionError, SessionManager, ValidationError,
};
pub use board::{NewPost, PaginatedResult, Pagination, Post, PostService, PostWithAuthor};
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository};
pub use error::{BoardError, Result};
pub use web::WebServer;
