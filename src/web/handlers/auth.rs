//! Authentication handlers.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use super::AppState;
use crate::auth::{validation::is_blank, SessionManager};
use crate::web::dto::{LoginRequest, LoginResponse, MeResponse, MessageResponse, UserInfo};
use crate::web::error::ApiError;
use crate::web::middleware::{clear_session_cookies, set_session_cookies, MaybeSessionUser, SessionUser};
use crate::BoardError;

/// POST /api/auth/login - Verify credentials and set the session cookies.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    let Json(req) = body?;
    if is_blank(&req.id) || is_blank(&req.password) {
        return Err(ApiError::bad_request("id and password are required"));
    }

    let sessions = SessionManager::new(state.db.pool(), &state.hasher);
    let (user, token) = sessions
        .login(&req.id, &req.password)
        .await
        .map_err(BoardError::from)?;

    let jar = set_session_cookies(jar, &token, &state.config.session);
    Ok((
        jar,
        Json(LoginResponse {
            success: true,
            message: "Login successful".to_string(),
            user: UserInfo::from(&user),
        }),
    ))
}

/// GET /api/auth/me - Current member.
pub async fn me(SessionUser(user): SessionUser) -> Json<MeResponse> {
    Json(MeResponse {
        success: true,
        user: UserInfo::from(&user),
    })
}

/// POST /api/auth/logout - End the session and expire the cookies.
///
/// Succeeds without a session; only a valid pair clears the stored token.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    MaybeSessionUser(user): MaybeSessionUser,
) -> Result<(CookieJar, Json<MessageResponse>), ApiError> {
    if let Some(user) = user {
        SessionManager::new(state.db.pool(), &state.hasher)
            .logout(&user.id)
            .await
            .map_err(BoardError::from)?;
    }

    let jar = clear_session_cookies(jar, &state.config.session);
    Ok((jar, Json(MessageResponse::success("Logged out"))))
}
