//! Web API end-to-end test
//!
//! Walks one member through register, login, create, read, update and
//! delete over HTTP.

mod common;

use axum::http::header::COOKIE;
use axum::http::StatusCode;
use common::*;
use serde_json::{json, Value};

#[tokio::test]
async fn test_member_post_lifecycle() {
    let (server, _db) = create_test_server().await;

    // Register
    let response = server
        .post("/api/users")
        .json(&json!({
            "id": "u1",
            "password": "pw",
            "confirm_password": "pw",
            "email": "e@x.com",
            "nickname": "n1",
            "name": "U1"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    // Login
    let response = server
        .post("/api/auth/login")
        .json(&json!({ "id": "u1", "password": "pw" }))
        .await;
    response.assert_status_ok();
    let names: Vec<String> = set_cookies(&response).into_iter().map(|(n, _)| n).collect();
    assert!(names.contains(&"board_uid".to_string()));
    assert!(names.contains(&"board_sid".to_string()));
    let cookies = cookie_header(&response);

    // Create
    let response = server
        .post("/api/posts")
        .add_header(COOKIE, cookies.clone())
        .json(&json!({ "title": "T", "content": "C" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["post"]["view_count"], 0);
    let id = body["post"]["id"].as_str().unwrap().to_string();

    // Read
    let response = server.get(&format!("/api/posts/{id}")).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["post"]["view_count"], 1);
    assert_eq!(body["post"]["author_nickname"], "n1");

    // Update
    server
        .put(&format!("/api/posts/{id}"))
        .add_header(COOKIE, cookies.clone())
        .json(&json!({ "title": "T2", "content": "C" }))
        .await
        .assert_status_ok();
    let body: Value = server.get(&format!("/api/posts/{id}")).await.json();
    assert_eq!(body["post"]["title"], "T2");

    // Delete
    server
        .delete(&format!("/api/posts/{id}"))
        .add_header(COOKIE, cookies.clone())
        .await
        .assert_status_ok();
    server
        .get(&format!("/api/posts/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // Session survives, then ends on logout
    server
        .get("/api/auth/me")
        .add_header(COOKIE, cookies.clone())
        .await
        .assert_status_ok();
    server
        .post("/api/auth/logout")
        .add_header(COOKIE, cookies.clone())
        .await
        .assert_status_ok();
    server
        .get("/api/auth/me")
        .add_header(COOKIE, cookies)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
