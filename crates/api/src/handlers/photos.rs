//! Handlers for entity photos (`/photos`).
//!
//! Photos belong to a dog, litter or puppy. Each entity has at most one
//! cover photo; the repository keeps that invariant inside a transaction and
//! the `uq_photos_cover` index backs it up.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kennel_core::photos;
use kennel_core::types::DbId;
use kennel_core::uploads;
use kennel_db::models::photo::{NewPhoto, Photo, PhotoListParams, ReorderPhotos, UpdatePhoto};
use kennel_db::repositories::PhotoRepo;
use kennel_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Best-effort removal of stored photo files after their rows are gone.
///
/// Files are tried against the photo store first, then the local store, so
/// photos uploaded before a CDN was configured are still cleaned up.
pub(crate) async fn remove_photo_files(state: &AppState, photos: &[Photo]) {
    let removals = photos.iter().map(|photo| async move {
        let removed = match state.photo_store.delete(&photo.url).await {
            Ok(true) => Ok(true),
            Ok(false) => state.document_store.delete(&photo.url).await,
            Err(e) => Err(e),
        };
        if let Err(e) = removed {
            tracing::warn!(photo_id = photo.id, url = %photo.url, error = %e, "Failed to remove photo file");
        }
    });
    futures::future::join_all(removals).await;
}

async fn ensure_entity_exists(pool: &DbPool, entity_type: &str, entity_id: DbId) -> AppResult<()> {
    photos::validate_entity_type(entity_type)?;
    if PhotoRepo::entity_exists(pool, entity_type, entity_id).await? {
        Ok(())
    } else {
        let entity = match entity_type {
            photos::ENTITY_DOG => "Dog",
            photos::ENTITY_LITTER => "Litter",
            _ => "Puppy",
        };
        Err(AppError::not_found(entity, entity_id))
    }
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::BadRequest(e.to_string())
}

/// GET /api/photos?entity_type=&entity_id=
///
/// Cover first, then by sort order.
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PhotoListParams>,
) -> AppResult<impl IntoResponse> {
    ensure_entity_exists(&state.pool, &params.entity_type, params.entity_id).await?;
    let items = PhotoRepo::list_for_entity(&state.pool, &params.entity_type, params.entity_id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/photos/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let photo = PhotoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Photo", id))?;
    Ok(Json(DataResponse { data: photo }))
}

/// POST /api/photos
///
/// Multipart fields: `file` (required), `entity_type`, `entity_id`,
/// optional `caption` and `is_cover`. The first photo of an entity always
/// becomes its cover.
pub async fn upload(
    _auth: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut file_data: Option<(String, Vec<u8>)> = None;
    let mut entity_type: Option<String> = None;
    let mut entity_id: Option<String> = None;
    let mut caption: Option<String> = None;
    let mut is_cover: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                file_data = Some((filename, data.to_vec()));
            }
            "entity_type" => entity_type = Some(field.text().await.map_err(multipart_error)?),
            "entity_id" => entity_id = Some(field.text().await.map_err(multipart_error)?),
            "caption" => caption = Some(field.text().await.map_err(multipart_error)?),
            "is_cover" => is_cover = Some(field.text().await.map_err(multipart_error)?),
            _ => {}
        }
    }

    let (filename, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    let entity_type = entity_type
        .map(|t| t.trim().to_string())
        .ok_or_else(|| AppError::BadRequest("Missing required 'entity_type' field".into()))?;
    let entity_id: DbId = entity_id
        .as_deref()
        .map(str::trim)
        .ok_or_else(|| AppError::BadRequest("Missing required 'entity_id' field".into()))?
        .parse()
        .map_err(|_| AppError::BadRequest("entity_id must be an integer".into()))?;
    let is_cover = match is_cover.as_deref().map(str::trim) {
        None | Some("") => None,
        Some("true") | Some("1") | Some("on") => Some(true),
        Some("false") | Some("0") | Some("off") => Some(false),
        Some(other) => {
            return Err(AppError::BadRequest(format!(
                "is_cover must be true or false, got '{other}'"
            )))
        }
    };
    let caption = caption.filter(|c| !c.trim().is_empty());

    ensure_entity_exists(&state.pool, &entity_type, entity_id).await?;

    let ext = uploads::validate_extension(&filename, uploads::IMAGE_EXTENSIONS)?;
    uploads::validate_size(data.len(), state.config.max_upload_bytes)?;
    let (width, height) = uploads::image_dimensions(&data)?;

    let content_type = uploads::content_type_for(&ext);
    let stored_name = uploads::random_filename(&ext);
    let size_bytes = data.len() as i64;
    let folder = format!("photos/{entity_type}");
    let url = state
        .photo_store
        .save(&folder, &stored_name, data, content_type)
        .await?;

    let input = NewPhoto {
        entity_type,
        entity_id,
        url,
        file_name: filename,
        caption,
        is_cover,
        width: i32::try_from(width).ok(),
        height: i32::try_from(height).ok(),
        content_type: Some(content_type.to_string()),
        size_bytes: Some(size_bytes),
    };

    let photo = match PhotoRepo::create(&state.pool, &input).await {
        Ok(photo) => photo,
        Err(e) => {
            // Do not leave an orphaned file behind a failed insert.
            if let Err(cleanup) = state.photo_store.delete(&input.url).await {
                tracing::warn!(url = %input.url, error = %cleanup, "Failed to remove orphaned upload");
            }
            return Err(e.into());
        }
    };

    tracing::info!(
        photo_id = photo.id,
        entity_type = %photo.entity_type,
        entity_id = photo.entity_id,
        is_cover = photo.is_cover,
        "Photo uploaded"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: photo })))
}

/// PUT /api/photos/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePhoto>,
) -> AppResult<impl IntoResponse> {
    if input.sort_order.is_some_and(|s| s < 0) {
        return Err(AppError::BadRequest("sort_order must not be negative".into()));
    }
    let photo = PhotoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Photo", id))?;
    Ok(Json(DataResponse { data: photo }))
}

/// POST /api/photos/{id}/cover
///
/// Makes the photo its entity's cover, clearing the previous cover in the
/// same transaction.
pub async fn set_cover(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let photo = PhotoRepo::set_cover(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Photo", id))?;

    tracing::info!(
        photo_id = id,
        entity_type = %photo.entity_type,
        entity_id = photo.entity_id,
        "Cover photo changed"
    );

    Ok(Json(DataResponse { data: photo }))
}

/// PUT /api/photos/reorder
///
/// `photo_ids` must list every photo of the entity exactly once; each
/// photo's sort order becomes its index in the list.
pub async fn reorder(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ReorderPhotos>,
) -> AppResult<impl IntoResponse> {
    ensure_entity_exists(&state.pool, &input.entity_type, input.entity_id).await?;

    let existing: Vec<DbId> =
        PhotoRepo::list_for_entity(&state.pool, &input.entity_type, input.entity_id)
            .await?
            .iter()
            .map(|p| p.id)
            .collect();
    photos::validate_reorder(&existing, &input.photo_ids)?;

    let items = PhotoRepo::reorder(
        &state.pool,
        &input.entity_type,
        input.entity_id,
        &input.photo_ids,
    )
    .await?;
    Ok(Json(DataResponse { data: items }))
}

/// DELETE /api/photos/{id}
///
/// Deleting the cover promotes the remaining photo with the lowest sort
/// order.
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let photo = PhotoRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Photo", id))?;

    remove_photo_files(&state, std::slice::from_ref(&photo)).await;

    tracing::info!(photo_id = id, was_cover = photo.is_cover, "Photo deleted");

    Ok(StatusCode::NO_CONTENT)
}
