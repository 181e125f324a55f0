#![allow(dead_code)]

//! Shared seed helpers for database integration tests.
//!
//! Seeds go through raw SQL so the tests exercise the repositories against
//! rows shaped exactly like production data, without depending on
//! write-paths that are themselves under test.

use sqlx::PgPool;

/// Insert a user and return its id.
pub async fn seed_user(pool: &PgPool, email: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO users (email, full_name) VALUES ($1, 'Test User') RETURNING id",
    )
    .bind(email)
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

/// Insert a product with the given price/discount and return its id.
pub async fn seed_product(pool: &PgPool, name: &str, price: f64, discount: f64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO products (name, description, price, discount)
         VALUES ($1, 'seeded', $2, $3)
         RETURNING id",
    )
    .bind(name)
    .bind(price)
    .bind(discount)
    .fetch_one(pool)
    .await
    .expect("seed product")
}

/// Insert a variant and return its id.
pub async fn seed_variant(
    pool: &PgPool,
    product_id: i64,
    stock: i32,
    additional_price: f64,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO product_variants (product_id, size, color, stock, additional_price)
         VALUES ($1, 'M', 'black', $2, $3)
         RETURNING id",
    )
    .bind(product_id)
    .bind(stock)
    .bind(additional_price)
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

/// Insert a bare pending order (bypassing checkout) and return its id.
pub async fn seed_order(pool: &PgPool, user_id: i64, address_id: i64, total: f64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO orders (user_id, total_amount, status, shipping_address_id)
         VALUES ($1, $2, 'pending', $3)
         RETURNING id",
    )
    .bind(user_id)
    .bind(total)
    .bind(address_id)
    .fetch_one(pool)
    .await
    .expect("seed order")
}

/// Count all rows in a table.
pub async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("count rows");
    count
}
