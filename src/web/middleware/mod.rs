//! Middleware for the HTTP API.

pub mod auth;
pub mod cors;
pub mod rate_limit;
pub mod security;

pub use auth::{
    clear_session_cookies, client_token, set_session_cookies, MaybeSessionUser, SessionUser,
};
pub use cors::create_cors_layer;
pub use rate_limit::{api_rate_limit, login_rate_limit, RateLimitState};
pub use security::security_headers;
