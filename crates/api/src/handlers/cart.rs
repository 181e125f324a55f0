//! Handlers for the `/cart` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use validator::Validate;
use vastra_core::error::CoreError;
use vastra_core::pricing;
use vastra_core::types::DbId;
use vastra_db::models::cart::{
    AddCartItem, CartItem, CartLineDetail, UpdateCartItem, MAX_LINE_QUANTITY,
};
use vastra_db::repositories::{CartRepo, VariantRepo};

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Cart contents with a running total at current prices.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: f64,
}

/// One cart line with its current line total.
#[derive(Debug, Serialize)]
pub struct CartLineView {
    #[serde(flatten)]
    pub line: CartLineDetail,
    pub line_total: f64,
}

/// GET /api/v1/cart
pub async fn get_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<CartView>>> {
    let lines = CartRepo::detailed_lines(&state.pool, user.user_id).await?;

    let lines: Vec<CartLineView> = lines
        .into_iter()
        .map(|line| CartLineView {
            line_total: line.line_total(),
            line,
        })
        .collect();
    let total = pricing::round_money(lines.iter().map(|l| l.line_total).sum());

    Ok(Json(DataResponse {
        data: CartView { lines, total },
    }))
}

/// POST /api/v1/cart
///
/// Adds a variant to the cart, merging into an existing line when the user
/// already has one for this variant. The merged quantity must stay within
/// stock and the per-line cap.
pub async fn add_to_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<AddCartItem>,
) -> AppResult<(StatusCode, Json<CartItem>)> {
    input.validate()?;

    let variant = VariantRepo::find_by_id(&state.pool, input.variant_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Variant",
            id: input.variant_id,
        }))?;

    if let Some(existing) = CartRepo::find_line(&state.pool, user.user_id, input.variant_id).await?
    {
        let quantity = existing.quantity + input.quantity;
        check_line_quantity(quantity, variant.stock, input.variant_id)?;

        let item = CartRepo::set_quantity(&state.pool, existing.id, quantity)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "CartItem",
                id: existing.id,
            }))?;
        return Ok((StatusCode::OK, Json(item)));
    }

    check_line_quantity(input.quantity, variant.stock, input.variant_id)?;

    let item =
        CartRepo::insert_line(&state.pool, user.user_id, input.variant_id, input.quantity).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/v1/cart/{id}
pub async fn update_cart_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCartItem>,
) -> AppResult<Json<CartItem>> {
    input.validate()?;

    let line = CartRepo::find_by_id_for_user(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CartItem",
            id,
        }))?;

    let variant = VariantRepo::find_by_id(&state.pool, line.variant_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Variant",
            id: line.variant_id,
        }))?;

    check_line_quantity(input.quantity, variant.stock, line.variant_id)?;

    let item = CartRepo::set_quantity(&state.pool, line.id, input.quantity)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CartItem",
            id,
        }))?;
    Ok(Json(item))
}

/// DELETE /api/v1/cart/{id}
pub async fn remove_cart_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CartRepo::delete_line(&state.pool, id, user.user_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "CartItem",
            id,
        }))
    }
}

/// Validate a prospective line quantity against stock and the per-line cap.
fn check_line_quantity(quantity: i32, stock: i32, variant_id: DbId) -> Result<(), AppError> {
    if quantity > MAX_LINE_QUANTITY {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Maximum quantity per item is {MAX_LINE_QUANTITY}"
        ))));
    }
    if quantity > stock {
        return Err(AppError::Core(CoreError::InsufficientStock {
            variant_id,
            requested: quantity,
            available: stock,
        }));
    }
    Ok(())
}
