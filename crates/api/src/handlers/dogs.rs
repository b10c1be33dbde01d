//! Handlers for the `/dogs` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use kennel_core::dogs;
use kennel_core::error::CoreError;
use kennel_core::photos::ENTITY_DOG;
use kennel_core::types::DbId;
use kennel_core::validate;
use kennel_db::models::dog::{CreateDog, DogDetail, DogHealth, DogListParams, UpdateDog};
use kennel_db::repositories::{DogRepo, HealthRecordRepo, LitterRepo, PhotoRepo, VaccinationRepo};
use kennel_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::handlers::photos::remove_photo_files;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::triggers;

/// Check that the referenced parents exist and have the right gender.
///
/// `dog_id` is the dog being updated (`None` on create).
pub(crate) async fn check_parents(
    pool: &DbPool,
    dog_id: Option<DbId>,
    dam_id: Option<DbId>,
    sire_id: Option<DbId>,
) -> AppResult<()> {
    dogs::validate_parent_ids(dog_id, dam_id, sire_id)?;

    for (role, parent_id) in [("dam", dam_id), ("sire", sire_id)] {
        let Some(parent_id) = parent_id else {
            continue;
        };
        let parent = DogRepo::find_summary(pool, parent_id).await?.ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "{role}_id {parent_id} does not refer to an existing dog"
            )))
        })?;
        dogs::validate_parent_gender(role, &parent.gender)?;
    }
    Ok(())
}

/// GET /api/dogs
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<DogListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(gender) = params.gender.as_deref() {
        dogs::validate_gender(gender)?;
    }
    if let Some(status) = params.status.as_deref() {
        dogs::validate_status(status)?;
    }

    let items = DogRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/dogs/{id}
///
/// The dog with its dam and sire summaries and its photos.
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let dog = DogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Dog", id))?;

    let dam = match dog.dam_id {
        Some(dam_id) => DogRepo::find_summary(&state.pool, dam_id).await?,
        None => None,
    };
    let sire = match dog.sire_id {
        Some(sire_id) => DogRepo::find_summary(&state.pool, sire_id).await?,
        None => None,
    };
    let photos = PhotoRepo::list_for_entity(&state.pool, ENTITY_DOG, id).await?;

    Ok(Json(DataResponse {
        data: DogDetail {
            dog,
            dam,
            sire,
            photos,
        },
    }))
}

/// POST /api/dogs
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateDog>,
) -> AppResult<impl IntoResponse> {
    validate::non_empty("name", &input.name)?;
    dogs::validate_gender(&input.gender)?;
    if let Some(status) = input.status.as_deref() {
        dogs::validate_status(status)?;
    }
    dogs::validate_weight(input.weight_lbs)?;
    check_parents(&state.pool, None, input.dam_id, input.sire_id).await?;

    let dog = DogRepo::create(&state.pool, &input).await?;

    tracing::info!(dog_id = dog.id, name = %dog.name, "Dog created");

    triggers::fire(
        &state.pool,
        Some(triggers::dog_added_trigger(&dog, Utc::now().date_naive())),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: dog })))
}

/// PUT /api/dogs/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDog>,
) -> AppResult<impl IntoResponse> {
    let existing = DogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Dog", id))?;

    if let Some(name) = input.name.as_deref() {
        validate::non_empty("name", name)?;
    }
    if let Some(gender) = input.gender.as_deref() {
        dogs::validate_gender(gender)?;
    }
    if let Some(status) = input.status.as_deref() {
        dogs::validate_status(status)?;
    }
    dogs::validate_weight(input.weight_lbs)?;
    check_parents(
        &state.pool,
        Some(id),
        input.dam_id.or(existing.dam_id),
        input.sire_id.or(existing.sire_id),
    )
    .await?;

    let dog = DogRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Dog", id))?;

    tracing::info!(dog_id = id, "Dog updated");

    Ok(Json(DataResponse { data: dog }))
}

/// DELETE /api/dogs/{id}
///
/// Also removes the dog's photos. A dog that is still the dam of a litter
/// cannot be deleted (foreign key, 400).
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !DogRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Dog", id));
    }

    let photos = PhotoRepo::delete_for_entity(&state.pool, ENTITY_DOG, id).await?;
    remove_photo_files(&state, &photos).await;

    tracing::info!(dog_id = id, photos = photos.len(), "Dog deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/dogs/{id}/litters
///
/// Litters where the dog is the dam or the sire.
pub async fn litters(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_dog_exists(&state.pool, id).await?;
    let items = LitterRepo::list_for_dog(&state.pool, id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/dogs/{id}/health
pub async fn health(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_dog_exists(&state.pool, id).await?;
    let records = HealthRecordRepo::list_for_dog(&state.pool, id).await?;
    let vaccinations = VaccinationRepo::list_for_dog(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: DogHealth {
            records,
            vaccinations,
        },
    }))
}

async fn ensure_dog_exists(pool: &DbPool, id: DbId) -> AppResult<()> {
    DogRepo::find_summary(pool, id)
        .await?
        .map(|_| ())
        .ok_or(AppError::not_found("Dog", id))
}
