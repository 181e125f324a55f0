#![allow(dead_code)]

//! Shared helpers for API integration tests: app construction, auth tokens,
//! request plumbing, and database seeding.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use vastra_api::auth::jwt::{generate_access_token, JwtConfig};
use vastra_api::config::ServerConfig;
use vastra_api::router::build_app_router;
use vastra_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and no external provider clients.
///
/// This goes through the same [`build_app_router`] as production, so tests
/// exercise the real middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery).
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        stripe: None,
        lightx: None,
        storage: None,
    };
    build_app_router(state, &config)
}

/// `Bearer ...` header value for a signed-in test user.
pub fn bearer_for(user_id: i64, role: &str) -> String {
    let token = generate_access_token(user_id, role, &test_config().jwt)
        .expect("generate test token");
    format!("Bearer {token}")
}

/// Issue a GET without authentication.
pub async fn get(app: Router, path: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("build request"),
    )
    .await
    .expect("send request")
}

/// Issue a GET with a Bearer token.
pub async fn get_auth(app: Router, path: &str, bearer: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(path)
            .header("authorization", bearer)
            .body(Body::empty())
            .expect("build request"),
    )
    .await
    .expect("send request")
}

/// Issue a JSON request with a Bearer token.
pub async fn send_json(
    app: Router,
    method: &str,
    path: &str,
    bearer: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(path)
            .header("authorization", bearer)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("build request"),
    )
    .await
    .expect("send request")
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("parse body as JSON")
}

/// Assert a response status and return its JSON body.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// Insert a user with the given role and return its id.
pub async fn seed_user(pool: &PgPool, email: &str, role: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO users (email, full_name, role) VALUES ($1, 'Test User', $2) RETURNING id",
    )
    .bind(email)
    .bind(role)
    .fetch_one(pool)
    .await
    .expect("seed user")
}

/// Insert a shipping address for a user and return its id.
pub async fn seed_address(pool: &PgPool, user_id: i64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO user_addresses (user_id, line1, city, state, country, zip_code)
         VALUES ($1, '1 Test Lane', 'Pune', 'MH', 'IN', '411001')
         RETURNING id",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
    .expect("seed address")
}

/// Insert a product + variant and return the variant id.
pub async fn seed_variant(pool: &PgPool, name: &str, price: f64, stock: i32) -> i64 {
    let product_id: i64 = sqlx::query_scalar(
        "INSERT INTO products (name, price, discount) VALUES ($1, $2, 0) RETURNING id",
    )
    .bind(name)
    .bind(price)
    .fetch_one(pool)
    .await
    .expect("seed product");

    sqlx::query_scalar(
        "INSERT INTO product_variants (product_id, size, color, stock, additional_price)
         VALUES ($1, 'M', 'black', $2, 0)
         RETURNING id",
    )
    .bind(product_id)
    .bind(stock)
    .fetch_one(pool)
    .await
    .expect("seed variant")
}

/// Put a line into a user's cart.
pub async fn seed_cart_line(pool: &PgPool, user_id: i64, variant_id: i64, quantity: i32) {
    sqlx::query("INSERT INTO cart_items (user_id, variant_id, quantity) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(variant_id)
        .bind(quantity)
        .execute(pool)
        .await
        .expect("seed cart line");
}
