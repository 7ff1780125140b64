//! Shared helpers for HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::StatusCode;
use axum_test::{TestResponse, TestServer};
use clubboard::config::Config;
use clubboard::web::handlers::AppState;
use clubboard::web::middleware::RateLimitState;
use clubboard::web::router::create_router;
use clubboard::Database;
use serde_json::{json, Value};

/// Configuration suited to tests: fast hashing, plain-HTTP cookies and
/// generous rate limits.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.session.cookie_secure = false;
    config.password.memory_kib = 1024;
    config.password.iterations = 1;
    config.password.parallelism = 1;
    config.server.login_rate_limit = 1000;
    config.server.api_rate_limit = 10_000;
    config
}

/// Create a test server over a fresh in-memory database.
pub async fn create_test_server_with(config: Config) -> (TestServer, Database) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    let rate_limit = Arc::new(RateLimitState::new(
        config.server.login_rate_limit,
        config.server.api_rate_limit,
    ));
    let app_state = Arc::new(AppState::new(db.clone(), config).expect("Failed to build state"));
    let router = create_router(app_state, rate_limit);

    let server = TestServer::new(router).expect("Failed to create test server");
    (server, db)
}

/// Create a test server with [`test_config`].
pub async fn create_test_server() -> (TestServer, Database) {
    create_test_server_with(test_config()).await
}

/// Register a member whose nickname is derived from the id.
pub async fn register_user(server: &TestServer, id: &str, password: &str) -> TestResponse {
    server
        .post("/api/users")
        .json(&json!({
            "id": id,
            "name": format!("{id} name"),
            "password": password,
            "confirm_password": password,
            "email": format!("{id}@example.com"),
            "nickname": format!("{id}_nick"),
        }))
        .await
}

/// Log in and return the response.
pub async fn login(server: &TestServer, id: &str, password: &str) -> TestResponse {
    server
        .post("/api/auth/login")
        .json(&json!({ "id": id, "password": password }))
        .await
}

/// Collect `name=value` pairs from the response's `Set-Cookie` headers.
pub fn set_cookies(response: &TestResponse) -> Vec<(String, String)> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .filter_map(|pair| pair.split_once('='))
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .collect()
}

/// Raw `Set-Cookie` header for one cookie.
pub fn set_cookie_header(response: &TestResponse, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&prefix))
        .map(str::to_string)
}

/// Build a `Cookie` request header value from a login response.
pub fn cookie_header(response: &TestResponse) -> String {
    set_cookies(response)
        .into_iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Register and log in, returning the `Cookie` header value.
pub async fn register_and_login(server: &TestServer, id: &str, password: &str) -> String {
    register_user(server, id, password)
        .await
        .assert_status(StatusCode::CREATED);
    let response = login(server, id, password).await;
    response.assert_status_ok();
    cookie_header(&response)
}

/// Create a post as the holder of `cookies`, returning its id.
pub async fn create_post(server: &TestServer, cookies: &str, title: &str, content: &str) -> String {
    let response = server
        .post("/api/posts")
        .add_header(COOKIE, cookies.to_string())
        .json(&json!({ "title": title, "content": content }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    body["post"]["id"]
        .as_str()
        .expect("post id missing")
        .to_string()
}
