//! HTTP handlers.

pub mod auth;
pub mod post;
pub mod user;

pub use auth::{login, logout, me};
pub use post::{create_post, delete_post, get_post, list_posts, update_post};
pub use user::register;

use crate::auth::Hasher;
use crate::config::Config;
use crate::db::Database;
use crate::Result;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database pool.
    pub db: Database,
    /// Password hasher built from `[password]`.
    pub hasher: Hasher,
    /// Loaded configuration.
    pub config: Config,
}

impl AppState {
    /// Create the application state from a configuration that passes
    /// [`Config::validate`].
    pub fn new(db: Database, config: Config) -> Result<Self> {
        config.validate()?;
        let hasher = Hasher::new(&config.password)?;
        Ok(Self { db, hasher, config })
    }
}
