//! Router configuration for the HTTP API.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use super::handlers::{
    create_post, delete_post, get_post, list_posts, login, logout, me, register, update_post,
    AppState,
};
use super::middleware::{
    api_rate_limit, create_cors_layer, login_rate_limit, security_headers, RateLimitState,
};

/// Create the main API router, nested under `/api`.
pub fn create_router(app_state: Arc<AppState>, rate_limit: Arc<RateLimitState>) -> Router {
    let login_limit = rate_limit.clone();
    let login_route = Router::new()
        .route("/login", post(login))
        .layer(middleware::from_fn(move |req, next| {
            login_rate_limit(login_limit.clone(), req, next)
        }));

    let auth_routes = Router::new()
        .merge(login_route)
        .route("/me", get(me))
        .route("/logout", post(logout));

    let post_routes = Router::new()
        .route("/", get(list_posts).post(create_post))
        .route(
            "/:id",
            get(get_post)
                .put(update_post)
                .patch(update_post)
                .delete(delete_post),
        );

    let api_limit = rate_limit;
    let api_routes = Router::new()
        .route("/users", post(register))
        .nest("/auth", auth_routes)
        .nest("/posts", post_routes)
        .layer(middleware::from_fn(move |req, next| {
            api_rate_limit(api_limit.clone(), req, next)
        }));

    let cors_origins = app_state.config.server.cors_origins.clone();

    Router::new()
        .nest("/api", api_routes)
        .merge(create_health_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(&cors_origins))
                .layer(middleware::from_fn(security_headers))
                .layer(CompressionLayer::new()),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
