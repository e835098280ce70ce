//! Shared helpers for API integration tests.
#![allow(dead_code)]

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderValue, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use ideatrack_api::auth::jwt::JwtConfig;
use ideatrack_api::config::ServerConfig;
use ideatrack_api::router::build_app_router;
use ideatrack_api::state::AppState;

pub const TEST_JWT_SECRET: &str = "test-secret-for-integration-tests";
pub const TEST_PASSWORD: &str = "password123";

/// Build a test `ServerConfig` with safe defaults. Cookies are not marked
/// `Secure` so assertions can match the plain attribute list.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        database_url: "postgres://localhost/unused".into(),
        db_max_connections: 5,
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout_secs: 30,
        cookie_secure: false,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.into(),
            expiry_hours: 24,
        },
    }
}

/// Build the full application router around `pool`, through the same
/// builder the server binary uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// An app whose pool never connects. Only for requests that are rejected
/// before touching the database.
pub fn build_offline_app() -> Router {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy("postgres://localhost/unused")
        .expect("lazy pool creation should not fail");
    build_test_app(pool)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The first `Set-Cookie` header value, if any.
pub fn set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Account helpers
// ---------------------------------------------------------------------------

/// Register `email` with [`TEST_PASSWORD`] and return `(user_id, token)`.
pub async fn register(app: Router, email: &str) -> (String, String) {
    let body = serde_json::json!({ "email": email, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    let json = body_json(response).await;
    (
        json["user"]["id"].as_str().unwrap().to_string(),
        json["token"].as_str().unwrap().to_string(),
    )
}

/// Insert an admin directly (registration refuses the admin role) and log
/// in through the API. Returns `(user_id, token)`.
pub async fn create_admin(pool: &PgPool, app: Router, email: &str) -> (String, String) {
    let password_hash = ideatrack_api::auth::password::hash_password(TEST_PASSWORD).unwrap();
    ideatrack_db::repositories::UserRepo::create(
        pool,
        &ideatrack_db::models::user::CreateUser {
            email: email.into(),
            password_hash,
            user_name: Some("Admin".into()),
            bio: None,
            roles: vec!["admin".into(), "user".into()],
        },
    )
    .await
    .unwrap();

    let body = serde_json::json!({ "email": email, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let json = body_json(response).await;
    (
        json["user"]["id"].as_str().unwrap().to_string(),
        json["token"].as_str().unwrap().to_string(),
    )
}
