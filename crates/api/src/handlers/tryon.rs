//! Handlers for the `/vton` resource: portrait management and try-on jobs.
//!
//! `generate` is the one fire-and-forget path in the system: after the
//! provider accepts the job, the handler persists a `processing` row,
//! responds `202 Accepted`, and detaches a poll task that resolves the row
//! later. Provider failures *before* the row exists abort the request;
//! failures inside the poll loop only ever resolve the row to `failed`.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use vastra_core::error::CoreError;
use vastra_core::tryon::{SegmentationType, TryOnStatus};
use vastra_core::types::DbId;
use vastra_db::models::user_image::{SaveUserImage, UserImage};
use vastra_db::models::vton_job::{GenerateTryOn, NewVtonJob, VtonHistoryEntry, VtonJob};
use vastra_db::repositories::{ProductMediaRepo, UserImageRepo, VtonJobRepo};
use vastra_lightx::LightXClient;
use vastra_storage::S3Store;

use crate::auth::AuthUser;
use crate::background;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Content type used for portrait and outfit uploads.
const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// S3 key prefix for try-on portraits.
const PORTRAIT_PREFIX: &str = "vton";

/// Query parameters for `GET /vton/upload-url`.
#[derive(Debug, Deserialize)]
pub struct UploadUrlQuery {
    pub file_name: String,
}

/// Presigned upload slot for a portrait.
#[derive(Debug, Serialize)]
pub struct UploadUrlResponse {
    pub upload_url: String,
    pub file_url: String,
    pub s3_key: String,
}

/// Response for an accepted try-on job.
#[derive(Debug, Serialize)]
pub struct AcceptedTryOn {
    pub job_id: DbId,
    pub provider_order_id: String,
    pub status: TryOnStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_response_time_secs: Option<u32>,
}

/// GET /api/v1/vton/upload-url
pub async fn upload_url(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<UploadUrlQuery>,
) -> AppResult<Json<DataResponse<UploadUrlResponse>>> {
    if query.file_name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "file_name is required".into(),
        )));
    }

    let storage = require_storage(&state)?;
    let slot = storage
        .presign_upload(PORTRAIT_PREFIX, &query.file_name, IMAGE_CONTENT_TYPE)
        .await?;

    Ok(Json(DataResponse {
        data: UploadUrlResponse {
            upload_url: slot.upload_url,
            file_url: slot.file_url,
            s3_key: slot.key,
        },
    }))
}

/// POST /api/v1/vton/user-images
pub async fn save_user_image(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<SaveUserImage>,
) -> AppResult<(StatusCode, Json<UserImage>)> {
    if input.image_url.is_empty() || input.s3_key.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "image_url and s3_key are required".into(),
        )));
    }

    let image =
        UserImageRepo::insert(&state.pool, user.user_id, &input.image_url, &input.s3_key).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

/// GET /api/v1/vton/user-images
pub async fn list_user_images(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<UserImage>>>> {
    let images = UserImageRepo::list_by_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: images }))
}

/// DELETE /api/v1/vton/user-images/{id}
pub async fn delete_user_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = UserImageRepo::delete(&state.pool, id, user.user_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "UserImage",
            id,
        }))
    }
}

/// POST /api/v1/vton/generate
///
/// Uploads the portrait and the product's primary image to the provider,
/// submits the try-on job, persists a `processing` row, and returns 202
/// immediately. The detached poll task resolves the row later.
pub async fn generate(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<GenerateTryOn>,
) -> AppResult<(StatusCode, Json<DataResponse<AcceptedTryOn>>)> {
    let segmentation = SegmentationType::try_from(input.segmentation_type.unwrap_or(0))
        .map_err(AppError::Core)?;

    // Cloned handle so the detached poll task can outlive this request.
    let lightx = state.lightx.clone().ok_or(AppError::Core(
        CoreError::ExternalProvider("Try-on provider is not configured".into()),
    ))?;
    let storage = require_storage(&state)?;

    let portrait = UserImageRepo::find_by_id_for_user(&state.pool, input.user_image_id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "UserImage",
            id: input.user_image_id,
        }))?;

    let outfit_url = ProductMediaRepo::primary_url(&state.pool, input.product_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id: input.product_id,
        }))?;

    // The portrait bucket is private; fetch through a presigned URL. The
    // product image is public.
    let portrait_download = storage.presign_download(&portrait.s3_key).await?;
    let portrait_handle = upload_to_provider(&lightx, storage, &portrait_download).await?;
    let outfit_handle = upload_to_provider(&lightx, storage, &outfit_url).await?;

    let submission = lightx
        .submit_try_on(&portrait_handle, &outfit_handle, segmentation)
        .await?;

    let job = VtonJobRepo::insert(
        &state.pool,
        &NewVtonJob {
            user_id: user.user_id,
            user_image_id: input.user_image_id,
            product_id: input.product_id,
            provider_order_id: submission.order_id.clone(),
            segmentation_type: segmentation,
        },
    )
    .await?;

    tracing::info!(
        job_id = job.id,
        provider_order_id = %submission.order_id,
        "Try-on job accepted"
    );

    background::tryon_poll::spawn(
        state.pool.clone(),
        Arc::clone(&lightx),
        job.id,
        submission.order_id.clone(),
    );

    Ok((
        StatusCode::ACCEPTED,
        Json(DataResponse {
            data: AcceptedTryOn {
                job_id: job.id,
                provider_order_id: submission.order_id,
                status: job.status,
                max_retries: submission.max_retries_allowed,
                avg_response_time_secs: submission.avg_response_time_secs,
            },
        }),
    ))
}

/// GET /api/v1/vton/jobs/{id}
pub async fn job_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<VtonJob>>> {
    let job = VtonJobRepo::find_by_id_for_user(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VtonJob",
            id,
        }))?;
    Ok(Json(DataResponse { data: job }))
}

/// GET /api/v1/vton/history
pub async fn history(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<VtonHistoryEntry>>>> {
    let entries = VtonJobRepo::history(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// Fetch an image and run it through the provider's two-step upload.
/// Returns the canonical provider-side URL for the uploaded image.
async fn upload_to_provider(
    lightx: &LightXClient,
    storage: &S3Store,
    source_url: &str,
) -> Result<String, AppError> {
    let bytes = storage.fetch_bytes(source_url).await?;
    let slot = lightx
        .request_upload_slot(bytes.len(), IMAGE_CONTENT_TYPE)
        .await?;
    lightx
        .upload_image(&slot.upload_url, bytes, IMAGE_CONTENT_TYPE)
        .await?;
    Ok(slot.image_url)
}

/// The configured object store, or an external-provider error.
fn require_storage(state: &AppState) -> Result<&S3Store, AppError> {
    state.storage.as_deref().ok_or(AppError::Core(
        CoreError::ExternalProvider("Object storage is not configured".into()),
    ))
}
