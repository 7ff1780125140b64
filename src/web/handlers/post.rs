//! Post handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::AppState;
use crate::board::{Pagination, PostService};
use crate::web::dto::{
    CreatePostResponse, ListPostsQuery, MessageResponse, PostListResponse, PostRequest,
    PostResponse,
};
use crate::web::error::ApiError;
use crate::web::middleware::{MaybeSessionUser, SessionUser};

fn service(state: &AppState) -> PostService<'_> {
    PostService::new(state.db.pool(), &state.config.board)
}

/// GET /api/posts - List posts newest first.
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListPostsQuery>, QueryRejection>,
) -> Result<Json<PostListResponse>, ApiError> {
    let Query(query) = query?;
    let pagination = Pagination::from_query(query.page, query.page_size, &state.config.board)?;
    let result = service(&state).list(pagination).await?;
    Ok(Json(result.into()))
}

/// GET /api/posts/:id - Read a post and count the view.
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = service(&state).read(&id).await?;
    Ok(Json(PostResponse { post }))
}

/// POST /api/posts - Create a post.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    SessionUser(user): SessionUser,
    body: Result<Json<PostRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatePostResponse>), ApiError> {
    let Json(req) = body?;
    let post = service(&state)
        .create(Some(&user), &req.title, &req.content)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePostResponse {
            success: true,
            message: "Post created".to_string(),
            post,
        }),
    ))
}

/// PUT/PATCH /api/posts/:id - Replace title and content (owner only).
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    MaybeSessionUser(user): MaybeSessionUser,
    Path(id): Path<String>,
    body: Result<Json<PostRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let service = service(&state);
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            // Authentication and ownership failures outrank a bad body.
            service.check_mutation(user.as_ref(), &id).await?;
            return Err(rejection.into());
        }
    };

    service
        .update(user.as_ref(), &id, &req.title, &req.content)
        .await?;
    Ok(Json(MessageResponse::message("Post updated")))
}

/// DELETE /api/posts/:id - Delete a post (owner only).
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    MaybeSessionUser(user): MaybeSessionUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    service(&state).delete(user.as_ref(), &id).await?;
    Ok(Json(MessageResponse::message("Post deleted")))
}
