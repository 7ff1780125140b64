//! Configuration module for clubboard.

use serde::Deserialize;
use std::path::Path;

use crate::{BoardError, Result};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Rate limit for the login endpoint (requests per minute per IP).
    #[serde(default = "default_login_rate_limit")]
    pub login_rate_limit: u32,
    /// Rate limit for the other API endpoints (requests per minute per IP).
    #[serde(default = "default_api_rate_limit")]
    pub api_rate_limit: u32,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_login_rate_limit() -> u32 {
    10
}

fn default_api_rate_limit() -> u32 {
    300
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
            login_rate_limit: default_login_rate_limit(),
            api_rate_limit: default_api_rate_limit(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/clubboard.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/clubboard.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Session cookie configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Mark session cookies `Secure` (HTTPS only).
    ///
    /// Only turn this off for local development over plain HTTP.
    #[serde(default = "default_cookie_secure")]
    pub cookie_secure: bool,
    /// Cookie lifetime in days.
    #[serde(default = "default_session_max_age_days")]
    pub max_age_days: i64,
}

fn default_cookie_secure() -> bool {
    true
}

fn default_session_max_age_days() -> i64 {
    7
}

/// Longest accepted cookie lifetime, in days.
pub const MAX_SESSION_AGE_DAYS: i64 = 3650;

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_secure: default_cookie_secure(),
            max_age_days: default_session_max_age_days(),
        }
    }
}

/// Argon2 parameters for password hashing.
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordConfig {
    /// Memory cost in KiB.
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    /// Time cost (iterations).
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Parallelism (lanes).
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

fn default_memory_kib() -> u32 {
    65536 // 64 MB
}

fn default_iterations() -> u32 {
    3
}

fn default_parallelism() -> u32 {
    4
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

/// Post limits and listing defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    /// Maximum title length in characters.
    #[serde(default = "default_max_title_length")]
    pub max_title_length: usize,
    /// Maximum content length in characters.
    #[serde(default = "default_max_content_length")]
    pub max_content_length: usize,
    /// Page size used when the client does not send one.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    /// Largest page size a client may request.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

fn default_max_title_length() -> usize {
    200
}

fn default_max_content_length() -> usize {
    20000
}

fn default_page_size() -> u32 {
    10
}

fn default_max_page_size() -> u32 {
    100
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            max_title_length: default_max_title_length(),
            max_content_length: default_max_content_length(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Session cookie configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// Password hashing configuration.
    #[serde(default)]
    pub password: PasswordConfig,
    /// Post limits.
    #[serde(default)]
    pub board: BoardConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(BoardError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| BoardError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `CLUBBOARD_DATABASE_PATH`: Override the database file path
    /// - `CLUBBOARD_COOKIE_SECURE`: `false`/`0` disables the `Secure` cookie flag
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("CLUBBOARD_DATABASE_PATH") {
            if !path.is_empty() {
                self.database.path = path;
            }
        }
        if let Ok(secure) = std::env::var("CLUBBOARD_COOKIE_SECURE") {
            match secure.to_lowercase().as_str() {
                "false" | "0" | "no" => self.session.cookie_secure = false,
                "true" | "1" | "yes" => self.session.cookie_secure = true,
                _ => {}
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_SESSION_AGE_DAYS).contains(&self.session.max_age_days) {
            return Err(BoardError::Config(format!(
                "session.max_age_days must be between 1 and {MAX_SESSION_AGE_DAYS}"
            )));
        }
        if self.server.login_rate_limit == 0 || self.server.api_rate_limit == 0 {
            return Err(BoardError::Config(
                "rate limits must be greater than zero".to_string(),
            ));
        }
        if self.board.default_page_size == 0
            || self.board.default_page_size > self.board.max_page_size
        {
            return Err(BoardError::Config(
                "board.default_page_size must be between 1 and board.max_page_size".to_string(),
            ));
        }
        argon2::Params::new(
            self.password.memory_kib,
            self.password.iterations,
            self.password.parallelism,
            None,
        )
        .map_err(|e| BoardError::Config(format!("invalid password parameters: {e}")))?;
        Ok(())
    }
}
