//! Member registration handler.

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use std::sync::Arc;

use super::AppState;
use crate::auth::{register as register_member, RegistrationRequest};
use crate::db::UserRepository;
use crate::web::dto::{MessageResponse, RegisterRequest};
use crate::web::error::ApiError;
use crate::BoardError;

/// POST /api/users - Register a new member.
pub async fn register(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(req) = body?;
    let request: RegistrationRequest = req.into();

    let repo = UserRepository::new(state.db.pool());
    register_member(&repo, &state.hasher, request)
        .await
        .map_err(BoardError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::success("Registration complete")),
    ))
}
