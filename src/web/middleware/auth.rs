//! Cookie session extractors and helpers.
//!
//! Handlers take [`SessionUser`] when a login is required and
//! [`MaybeSessionUser`] when it is optional. Both revalidate the cookie pair
//! against the stored token on every request.

use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::auth::{ClientToken, SessionManager, IDENTITY_COOKIE, SESSION_COOKIE};
use crate::config::SessionConfig;
use crate::db::User;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::BoardError;

/// Read the token pair from request cookies.
pub fn client_token(jar: &CookieJar) -> Option<ClientToken> {
    ClientToken::from_parts(
        jar.get(IDENTITY_COOKIE).map(|c| c.value().to_string()),
        jar.get(SESSION_COOKIE).map(|c| c.value().to_string()),
    )
}

fn build_cookie(name: &'static str, value: String, max_age: Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(max_age)
        .build()
}

/// Add both session cookies to the jar.
pub fn set_session_cookies(jar: CookieJar, token: &ClientToken, config: &SessionConfig) -> CookieJar {
    let max_age = Duration::days(config.max_age_days);
    jar.add(build_cookie(
        IDENTITY_COOKIE,
        token.user_id.clone(),
        max_age,
        config.cookie_secure,
    ))
    .add(build_cookie(
        SESSION_COOKIE,
        token.session_token.clone(),
        max_age,
        config.cookie_secure,
    ))
}

/// Expire both session cookies.
///
/// Always emits `Set-Cookie`, whether or not the request carried them.
pub fn clear_session_cookies(jar: CookieJar, config: &SessionConfig) -> CookieJar {
    jar.add(build_cookie(
        IDENTITY_COOKIE,
        String::new(),
        Duration::ZERO,
        config.cookie_secure,
    ))
    .add(build_cookie(
        SESSION_COOKIE,
        String::new(),
        Duration::ZERO,
        config.cookie_secure,
    ))
}

async fn resolve_user(parts: &mut Parts, state: &Arc<AppState>) -> Result<Option<User>, ApiError> {
    let jar = CookieJar::from_headers(&parts.headers);
    let Some(token) = client_token(&jar) else {
        return Ok(None);
    };

    SessionManager::new(state.db.pool(), &state.hasher)
        .resolve(&token)
        .await
        .map_err(|e| ApiError::from(BoardError::from(e)))
}

/// Authenticated member; rejects with 401 otherwise.
#[derive(Debug, Clone)]
pub struct SessionUser(pub User);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for SessionUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        resolve_user(parts, state)
            .await?
            .map(SessionUser)
            .ok_or_else(|| ApiError::from(BoardError::Unauthenticated))
    }
}

/// Member if the cookie pair is valid, `None` otherwise.
#[derive(Debug, Clone)]
pub struct MaybeSessionUser(pub Option<User>);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for MaybeSessionUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeSessionUser(resolve_user(parts, state).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap, HeaderValue};

    fn config(secure: bool) -> SessionConfig {
        SessionConfig {
            cookie_secure: secure,
            max_age_days: 7,
        }
    }

    fn jar_with(cookie: &'static str) -> CookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static(cookie));
        CookieJar::from_headers(&headers)
    }

    #[test]
    fn test_client_token_from_cookies() {
        let jar = jar_with("board_uid=alice; board_sid=tok123");
        assert_eq!(client_token(&jar), Some(ClientToken::new("alice", "tok123")));
    }

    #[test]
    fn test_client_token_requires_both_halves() {
        assert!(client_token(&jar_with("board_uid=alice")).is_none());
        assert!(client_token(&jar_with("board_sid=tok")).is_none());
        assert!(client_token(&jar_with("board_uid=; board_sid=tok")).is_none());
    }

    #[test]
    fn test_set_session_cookies_attributes() {
        let jar = set_session_cookies(
            CookieJar::new(),
            &ClientToken::new("alice", "tok"),
            &config(true),
        );

        let uid = jar.get(IDENTITY_COOKIE).unwrap();
        assert_eq!(uid.value(), "alice");
        assert_eq!(uid.http_only(), Some(true));
        assert_eq!(uid.secure(), Some(true));
        assert_eq!(uid.same_site(), Some(SameSite::Lax));
        assert_eq!(uid.path(), Some("/"));
        assert_eq!(uid.max_age(), Some(Duration::days(7)));

        let sid = jar.get(SESSION_COOKIE).unwrap();
        assert_eq!(sid.value(), "tok");
        assert_eq!(sid.http_only(), Some(true));
    }

    #[test]
    fn test_insecure_cookies_for_development() {
        let jar = set_session_cookies(
            CookieJar::new(),
            &ClientToken::new("alice", "tok"),
            &config(false),
        );
        assert_eq!(jar.get(SESSION_COOKIE).unwrap().secure(), Some(false));
    }

    #[test]
    fn test_clear_session_cookies() {
        let jar = clear_session_cookies(jar_with("board_uid=alice; board_sid=tok"), &config(true));
        let uid = jar.get(IDENTITY_COOKIE).unwrap();
        assert_eq!(uid.value(), "");
        assert_eq!(uid.max_age(), Some(Duration::ZERO));
        assert_eq!(jar.get(SESSION_COOKIE).unwrap().value(), "");
    }
}
