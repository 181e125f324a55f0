//! Integration tests for the checkout flow over HTTP.

mod common;

use axum::http::StatusCode;
use common::{bearer_for, expect_json, get_auth, send_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: empty cart checkout returns EMPTY_CART and creates nothing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn checkout_with_empty_cart_is_rejected(pool: PgPool) {
    let user = common::seed_user(&pool, "buyer@test.dev", "customer").await;
    let address = common::seed_address(&pool, user).await;
    let bearer = bearer_for(user, "customer");

    let app = common::build_test_app(pool.clone());
    let response = send_json(
        app,
        "POST",
        "/api/v1/orders",
        &bearer,
        json!({ "shipping_address_id": address, "payment_method": "cod" }),
    )
    .await;

    let body = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["code"], "EMPTY_CART");

    let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(orders, 0);
}

// ---------------------------------------------------------------------------
// Test: happy-path checkout then cancel over HTTP
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn checkout_then_cancel_round_trips(pool: PgPool) {
    let user = common::seed_user(&pool, "buyer@test.dev", "customer").await;
    let address = common::seed_address(&pool, user).await;
    let variant = common::seed_variant(&pool, "Tee", 20.0, 5).await;
    common::seed_cart_line(&pool, user, variant, 2).await;
    let bearer = bearer_for(user, "customer");

    // Create.
    let response = send_json(
        common::build_test_app(pool.clone()),
        "POST",
        "/api/v1/orders",
        &bearer,
        json!({ "shipping_address_id": address, "payment_method": "cod" }),
    )
    .await;
    let body = expect_json(response, StatusCode::CREATED).await;
    let order_id = body["data"]["id"].as_i64().expect("order id");
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["total_amount"], 40.0);
    assert_eq!(body["data"]["payment_method"], "cod");

    // The cart is now empty.
    let response = get_auth(common::build_test_app(pool.clone()), "/api/v1/cart", &bearer).await;
    let body = expect_json(response, StatusCode::OK).await;
    assert_eq!(body["data"]["lines"].as_array().unwrap().len(), 0);

    // Payment status is pending cod.
    let response = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/payments/{order_id}"),
        &bearer,
    )
    .await;
    let body = expect_json(response, StatusCode::OK).await;
    assert_eq!(body["data"]["method"], "cod");
    assert_eq!(body["data"]["status"], "pending");

    // Cancel restores stock.
    let response = send_json(
        common::build_test_app(pool.clone()),
        "PUT",
        &format!("/api/v1/orders/{order_id}/cancel"),
        &bearer,
        json!({}),
    )
    .await;
    let body = expect_json(response, StatusCode::OK).await;
    assert_eq!(body["data"]["status"], "cancelled");

    let stock: i32 = sqlx::query_scalar("SELECT stock FROM product_variants WHERE id = $1")
        .bind(variant)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stock, 5);
}

// ---------------------------------------------------------------------------
// Test: overdrawing the cart is a 409 with INSUFFICIENT_STOCK
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn overdrawn_checkout_is_conflict(pool: PgPool) {
    let user = common::seed_user(&pool, "buyer@test.dev", "customer").await;
    let address = common::seed_address(&pool, user).await;
    let variant = common::seed_variant(&pool, "Tee", 20.0, 1).await;
    common::seed_cart_line(&pool, user, variant, 3).await;
    let bearer = bearer_for(user, "customer");

    let response = send_json(
        common::build_test_app(pool.clone()),
        "POST",
        "/api/v1/orders",
        &bearer,
        json!({ "shipping_address_id": address, "payment_method": "cod" }),
    )
    .await;
    let body = expect_json(response, StatusCode::CONFLICT).await;
    assert_eq!(body["code"], "INSUFFICIENT_STOCK");
}

// ---------------------------------------------------------------------------
// Test: status transitions are admin-gated and validated
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn status_updates_are_admin_only_and_validated(pool: PgPool) {
    let user = common::seed_user(&pool, "buyer@test.dev", "customer").await;
    let admin = common::seed_user(&pool, "admin@test.dev", "admin").await;
    let address = common::seed_address(&pool, user).await;
    let variant = common::seed_variant(&pool, "Tee", 20.0, 5).await;
    common::seed_cart_line(&pool, user, variant, 1).await;
    let bearer = bearer_for(user, "customer");
    let admin_bearer = bearer_for(admin, "admin");

    let response = send_json(
        common::build_test_app(pool.clone()),
        "POST",
        "/api/v1/orders",
        &bearer,
        json!({ "shipping_address_id": address, "payment_method": "upi" }),
    )
    .await;
    let body = expect_json(response, StatusCode::CREATED).await;
    let order_id = body["data"]["id"].as_i64().unwrap();

    // Customers cannot transition orders.
    let response = send_json(
        common::build_test_app(pool.clone()),
        "PUT",
        &format!("/api/v1/orders/{order_id}/status"),
        &bearer,
        json!({ "status": "paid" }),
    )
    .await;
    let body = expect_json(response, StatusCode::FORBIDDEN).await;
    assert_eq!(body["code"], "FORBIDDEN");

    // Admins can, along the legal graph only.
    let response = send_json(
        common::build_test_app(pool.clone()),
        "PUT",
        &format!("/api/v1/orders/{order_id}/status"),
        &admin_bearer,
        json!({ "status": "shipped" }),
    )
    .await;
    let body = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["code"], "INVALID_STATE");

    let response = send_json(
        common::build_test_app(pool.clone()),
        "PUT",
        &format!("/api/v1/orders/{order_id}/status"),
        &admin_bearer,
        json!({ "status": "paid" }),
    )
    .await;
    let body = expect_json(response, StatusCode::OK).await;
    assert_eq!(body["data"]["status"], "paid");
}

// ---------------------------------------------------------------------------
// Test: card payments without a configured provider return 503
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn card_payment_without_provider_is_unavailable(pool: PgPool) {
    let user = common::seed_user(&pool, "buyer@test.dev", "customer").await;
    let address = common::seed_address(&pool, user).await;
    let variant = common::seed_variant(&pool, "Tee", 20.0, 5).await;
    common::seed_cart_line(&pool, user, variant, 1).await;
    let bearer = bearer_for(user, "customer");

    let response = send_json(
        common::build_test_app(pool.clone()),
        "POST",
        "/api/v1/orders",
        &bearer,
        json!({ "shipping_address_id": address, "payment_method": "cod" }),
    )
    .await;
    let body = expect_json(response, StatusCode::CREATED).await;
    let order_id = body["data"]["id"].as_i64().unwrap();

    let response = send_json(
        common::build_test_app(pool.clone()),
        "POST",
        "/api/v1/payments/initiate",
        &bearer,
        json!({ "order_id": order_id, "payment_method": "card" }),
    )
    .await;
    let body = expect_json(response, StatusCode::SERVICE_UNAVAILABLE).await;
    assert_eq!(body["code"], "PAYMENT_NOT_CONFIGURED");
}
