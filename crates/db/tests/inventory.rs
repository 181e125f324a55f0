//! Integration tests for the stock ledger.
//!
//! Exercises the conditional-decrement reservation against a real database,
//! including the two-writers race on a single variant.

mod common;

use sqlx::PgPool;
use vastra_db::repositories::VariantRepo;

#[sqlx::test(migrations = "./migrations")]
async fn reserve_decrements_within_stock(pool: PgPool) {
    let product = common::seed_product(&pool, "Tee", 20.0, 0.0).await;
    let variant = common::seed_variant(&pool, product, 5, 0.0).await;

    let mut conn = pool.acquire().await.unwrap();
    let reserved = VariantRepo::reserve(&mut conn, variant, 3).await.unwrap();
    assert!(reserved);

    assert_eq!(VariantRepo::stock_of(&pool, variant).await.unwrap(), Some(2));
}

#[sqlx::test(migrations = "./migrations")]
async fn reserve_rejects_overdraw_without_mutation(pool: PgPool) {
    let product = common::seed_product(&pool, "Tee", 20.0, 0.0).await;
    let variant = common::seed_variant(&pool, product, 5, 0.0).await;

    let mut conn = pool.acquire().await.unwrap();
    let reserved = VariantRepo::reserve(&mut conn, variant, 6).await.unwrap();
    assert!(!reserved, "overdraw must be rejected");

    // No partial decrement happened.
    assert_eq!(VariantRepo::stock_of(&pool, variant).await.unwrap(), Some(5));
}

#[sqlx::test(migrations = "./migrations")]
async fn reserve_unknown_variant_is_rejected(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let reserved = VariantRepo::reserve(&mut conn, 999_999, 1).await.unwrap();
    assert!(!reserved);
}

#[sqlx::test(migrations = "./migrations")]
async fn release_restores_reserved_units(pool: PgPool) {
    let product = common::seed_product(&pool, "Tee", 20.0, 0.0).await;
    let variant = common::seed_variant(&pool, product, 5, 0.0).await;

    let mut conn = pool.acquire().await.unwrap();
    assert!(VariantRepo::reserve(&mut conn, variant, 5).await.unwrap());
    assert_eq!(VariantRepo::stock_of(&pool, variant).await.unwrap(), Some(0));

    VariantRepo::release(&mut conn, variant, 5).await.unwrap();
    assert_eq!(VariantRepo::stock_of(&pool, variant).await.unwrap(), Some(5));
}

#[sqlx::test(migrations = "./migrations")]
async fn check_available_reflects_stock(pool: PgPool) {
    let product = common::seed_product(&pool, "Tee", 20.0, 0.0).await;
    let variant = common::seed_variant(&pool, product, 2, 0.0).await;

    assert!(VariantRepo::check_available(&pool, variant, 2).await.unwrap());
    assert!(!VariantRepo::check_available(&pool, variant, 3).await.unwrap());
    assert!(!VariantRepo::check_available(&pool, 999_999, 1).await.unwrap());
}

// ---------------------------------------------------------------------------
// Test: two concurrent reservations of 3 units against stock 5 — exactly one
// passes, stock ends at 2, never negative.
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn concurrent_reservations_cannot_overdraw(pool: PgPool) {
    let product = common::seed_product(&pool, "Tee", 20.0, 0.0).await;
    let variant = common::seed_variant(&pool, product, 5, 0.0).await;

    let mut conn_a = pool.acquire().await.unwrap();
    let mut conn_b = pool.acquire().await.unwrap();

    let (a, b) = tokio::join!(
        VariantRepo::reserve(&mut conn_a, variant, 3),
        VariantRepo::reserve(&mut conn_b, variant, 3),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert!(a ^ b, "exactly one reservation must win, got a={a} b={b}");
    assert_eq!(VariantRepo::stock_of(&pool, variant).await.unwrap(), Some(2));
}
