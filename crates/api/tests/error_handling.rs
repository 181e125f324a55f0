//! Integration tests for authentication rejections and the JSON error shape.

mod common;

use axum::http::StatusCode;
use common::{expect_json, get, get_auth};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: protected routes require an Authorization header
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/orders").await;

    let json = expect_json(response, StatusCode::UNAUTHORIZED).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert!(json["error"].is_string());
}

// ---------------------------------------------------------------------------
// Test: a garbage token is rejected
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/orders", "Bearer not-a-jwt").await;

    let json = expect_json(response, StatusCode::UNAUTHORIZED).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

// ---------------------------------------------------------------------------
// Test: non-Bearer scheme is rejected
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn basic_auth_scheme_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/orders", "Basic dXNlcjpwdw==").await;

    let json = expect_json(response, StatusCode::UNAUTHORIZED).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

// ---------------------------------------------------------------------------
// Test: errors carry a stable machine code
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn not_found_carries_machine_code(pool: PgPool) {
    let user = common::seed_user(&pool, "buyer@test.dev", "customer").await;
    let bearer = common::bearer_for(user, "customer");

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/orders/999999", &bearer).await;

    let json = expect_json(response, StatusCode::NOT_FOUND).await;
    assert_eq!(json["code"], "NOT_FOUND");
}
