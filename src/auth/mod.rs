//! Authentication module for clubboard.
//!
//! This module provides password hashing, session management,
//! member registration and ownership checks.

mod password;
mod permission;
mod registration;
mod session;
pub mod validation;

pub use password::{legacy_digest, Hasher, PasswordError, Verified, MAX_PASSWORD_LENGTH};
pub use permission::{can_mutate, require_owner, require_user};
pub use registration::{register, RegistrationError, RegistrationRequest};
pub use session::{
    generate_session_token, ClientToken, SessionError, SessionManager, IDENTITY_COOKIE,
    SESSION_COOKIE, SESSION_TOKEN_LENGTH,
};
pub use validation::ValidationError;
