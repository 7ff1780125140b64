//! Session management for clubboard.
//!
//! A session is a pair of values held by the client (identity and token)
//! checked against the token stored on the user record. The stored token
//! is the source of truth; each account holds at most one.

use chrono::Utc;
use rand::Rng;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::password::{Hasher, PasswordError};
use crate::db::{DbPool, User, UserRepository};
use crate::BoardError;

/// Cookie carrying the user identifier.
pub const IDENTITY_COOKIE: &str = "board_uid";

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "board_sid";

/// Length of a generated session token.
pub const SESSION_TOKEN_LENGTH: usize = 48;

const TOKEN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Session-related errors.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Unknown identifier or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Hashing failed while upgrading a digest.
    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    /// Store failure.
    #[error("database error: {0}")]
    Database(String),
}

impl From<BoardError> for SessionError {
    fn from(e: BoardError) -> Self {
        SessionError::Database(e.to_string())
    }
}

impl From<SessionError> for BoardError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::InvalidCredentials => BoardError::InvalidCredential,
            SessionError::Password(p) => BoardError::Password(p.to_string()),
            SessionError::Database(msg) => BoardError::Database(msg),
        }
    }
}

/// Generate a fresh session token (alphanumeric, ~285 bits).
pub fn generate_session_token() -> String {
    let mut rng = rand::rng();
    (0..SESSION_TOKEN_LENGTH)
        .map(|_| TOKEN_CHARSET[rng.random_range(0..TOKEN_CHARSET.len())] as char)
        .collect()
}

/// The token pair presented by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientToken {
    /// Claimed user identifier.
    pub user_id: String,
    /// Claimed session token.
    pub session_token: String,
}

impl ClientToken {
    /// Create a token pair.
    pub fn new(user_id: impl Into<String>, session_token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            session_token: session_token.into(),
        }
    }

    /// Build a pair from optional cookie values.
    ///
    /// Returns `None` if either half is missing or empty.
    pub fn from_parts(user_id: Option<String>, session_token: Option<String>) -> Option<Self> {
        match (user_id, session_token) {
            (Some(uid), Some(token)) if !uid.is_empty() && !token.is_empty() => {
                Some(Self::new(uid, token))
            }
            _ => None,
        }
    }
}

/// Issues, validates and clears sessions against the user store.
pub struct SessionManager<'a> {
    users: UserRepository<'a>,
    hasher: &'a Hasher,
}

impl<'a> SessionManager<'a> {
    /// Create a session manager over the given pool.
    pub fn new(pool: &'a DbPool, hasher: &'a Hasher) -> Self {
        Self {
            users: UserRepository::new(pool),
            hasher,
        }
    }

    /// Verify credentials and start a new session.
    ///
    /// Any previous session of the account is replaced. A legacy digest is
    /// rehashed with Argon2 after it verifies.
    pub async fn login(
        &self,
        user_id: &str,
        password: &str,
    ) -> Result<(User, ClientToken), SessionError> {
        let Some(mut user) = self.users.get_by_id(user_id).await? else {
            warn!(user_id = %user_id, "Login failed: user not found");
            return Err(SessionError::InvalidCredentials);
        };

        let verified = match self.hasher.verify(password, &user.password) {
            Ok(v) => v,
            Err(PasswordError::InvalidHash) => {
                warn!(user_id = %user_id, "Login failed: stored digest unreadable");
                return Err(SessionError::InvalidCredentials);
            }
            Err(_) => {
                warn!(user_id = %user_id, "Login failed: wrong password");
                return Err(SessionError::InvalidCredentials);
            }
        };

        if verified.needs_rehash() {
            self.upgrade_digest(&mut user, password).await;
        }

        let token = generate_session_token();
        let now = Utc::now();
        if !self.users.set_session(&user.id, &token, now).await? {
            // Deleted between lookup and update.
            return Err(SessionError::InvalidCredentials);
        }
        user.session_id = Some(token.clone());
        user.last_login_at = Some(now);

        info!(user_id = %user.id, "Login successful");

        let client = ClientToken::new(user.id.clone(), token);
        Ok((user, client))
    }

    async fn upgrade_digest(&self, user: &mut User, password: &str) {
        let digest = match self.hasher.hash(password) {
            Ok(d) => d,
            Err(e) => {
                warn!(user_id = %user.id, error = %e, "Could not rehash legacy digest");
                return;
            }
        };
        match self.users.update_password(&user.id, &digest).await {
            Ok(_) => {
                debug!(user_id = %user.id, "Legacy digest upgraded");
                user.password = digest;
            }
            Err(e) => warn!(user_id = %user.id, error = %e, "Could not store upgraded digest"),
        }
    }

    /// Resolve a presented token pair to its user.
    ///
    /// Returns `None` when the user is unknown, holds no session, or holds
    /// a different token.
    pub async fn resolve(&self, client: &ClientToken) -> Result<Option<User>, SessionError> {
        let Some(user) = self.users.get_by_id(&client.user_id).await? else {
            debug!(user_id = %client.user_id, "Session rejected: unknown user");
            return Ok(None);
        };

        if !user.session_matches(&client.session_token) {
            debug!(user_id = %client.user_id, "Session rejected: token mismatch");
            return Ok(None);
        }

        Ok(Some(user))
    }

    /// End the session of an account.
    ///
    /// Idempotent; returns true if a stored token was cleared.
    pub async fn logout(&self, user_id: &str) -> Result<bool, SessionError> {
        let cleared = self.users.clear_session(user_id).await?;
        if cleared {
            info!(user_id = %user_id, "Session logged out");
        }
        Ok(cleared)
    }
}
