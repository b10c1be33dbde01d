//! Handlers for the `/puppies` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use kennel_core::dogs::validate_gender;
use kennel_core::photos::ENTITY_PUPPY;
use kennel_core::puppies::{self, STATUS_AVAILABLE, STATUS_SOLD};
use kennel_core::types::DbId;
use kennel_core::validate;
use kennel_db::models::puppy::{CreatePuppy, PuppyListParams, UpdatePuppy};
use kennel_db::repositories::{PhotoRepo, PuppyRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::photos::remove_photo_files;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::triggers;

/// GET /api/puppies
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PuppyListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(status) = params.status.as_deref() {
        puppies::validate_status(status)?;
    }
    let items = PuppyRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/puppies/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let puppy = PuppyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Puppy", id))?;
    Ok(Json(DataResponse { data: puppy }))
}

/// POST /api/puppies
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePuppy>,
) -> AppResult<impl IntoResponse> {
    validate_gender(&input.gender)?;
    let status = input.status.as_deref().unwrap_or(STATUS_AVAILABLE);
    puppies::validate_status(status)?;
    puppies::validate_customer_for_status(status, input.customer_id)?;
    puppies::validate_birth_weight(input.birth_weight_oz)?;
    validate::non_negative_cents("price_cents", input.price_cents)?;

    let puppy = PuppyRepo::create(&state.pool, &input).await?;

    tracing::info!(puppy_id = puppy.id, litter_id = puppy.litter_id, "Puppy created");

    if puppy.status == STATUS_SOLD {
        triggers::fire(
            &state.pool,
            Some(triggers::puppy_sold_trigger(&puppy, Utc::now().date_naive())),
        )
        .await;
    }

    Ok((StatusCode::CREATED, Json(DataResponse { data: puppy })))
}

/// PUT /api/puppies/{id}
///
/// Moving a puppy to `sold` fires the `puppy_sold` rules.
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePuppy>,
) -> AppResult<impl IntoResponse> {
    let existing = PuppyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Puppy", id))?;

    if let Some(gender) = input.gender.as_deref() {
        validate_gender(gender)?;
    }
    let status = input.status.as_deref().unwrap_or(&existing.status);
    puppies::validate_status(status)?;
    puppies::validate_customer_for_status(status, input.customer_id.or(existing.customer_id))?;
    puppies::validate_birth_weight(input.birth_weight_oz)?;
    validate::non_negative_cents("price_cents", input.price_cents)?;

    let puppy = PuppyRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Puppy", id))?;

    tracing::info!(puppy_id = id, status = %puppy.status, "Puppy updated");

    if puppy.status == STATUS_SOLD && existing.status != STATUS_SOLD {
        triggers::fire(
            &state.pool,
            Some(triggers::puppy_sold_trigger(&puppy, Utc::now().date_naive())),
        )
        .await;
    }

    Ok(Json(DataResponse { data: puppy }))
}

/// DELETE /api/puppies/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !PuppyRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Puppy", id));
    }

    let photos = PhotoRepo::delete_for_entity(&state.pool, ENTITY_PUPPY, id).await?;
    remove_photo_files(&state, &photos).await;

    tracing::info!(puppy_id = id, "Puppy deleted");

    Ok(StatusCode::NO_CONTENT)
}
