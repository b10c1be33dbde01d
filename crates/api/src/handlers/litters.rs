//! Handlers for the `/litters` resource, including milestone generation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kennel_core::calendar;
use kennel_core::error::CoreError;
use kennel_core::litters;
use kennel_core::milestones;
use kennel_core::photos::{ENTITY_LITTER, ENTITY_PUPPY};
use kennel_core::rules::{TRIGGER_LITTER_BRED, TRIGGER_LITTER_WHELPED};
use kennel_core::types::{Date, DbId};
use kennel_core::validate;
use kennel_db::models::litter::{CreateLitter, Litter, LitterDetail, LitterListParams, UpdateLitter};
use kennel_db::models::puppy::PuppyListParams;
use kennel_db::repositories::event_repo::EventSubject;
use kennel_db::repositories::{EventRepo, LitterRepo, PhotoRepo, PuppyRepo};
use kennel_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::handlers::dogs::check_parents;
use crate::handlers::photos::remove_photo_files;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::triggers;

/// Whether a date was newly set or moved by a write.
fn became_set(before: Option<Date>, after: Option<Date>) -> bool {
    after.is_some() && after != before
}

/// Fire the litter triggers whose date changed between `before` and `after`.
async fn fire_litter_triggers(pool: &DbPool, before: Option<&Litter>, after: &Litter) {
    if became_set(before.and_then(|l| l.breeding_date), after.breeding_date) {
        triggers::fire(pool, triggers::litter_trigger(TRIGGER_LITTER_BRED, after)).await;
    }
    if became_set(before.and_then(|l| l.whelp_date), after.whelp_date) {
        triggers::fire(pool, triggers::litter_trigger(TRIGGER_LITTER_WHELPED, after)).await;
    }
}

/// GET /api/litters
///
/// Each litter carries its dam's and sire's names.
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<LitterListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(status) = params.status.as_deref() {
        litters::validate_status(status)?;
    }
    let items = LitterRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/litters/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let litter = LitterRepo::find_with_parents(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Litter", id))?;
    let puppies = PuppyRepo::list_by_litter(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: LitterDetail { litter, puppies },
    }))
}

/// POST /api/litters
///
/// `expected_whelp_date` defaults to 63 days after `breeding_date`.
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<CreateLitter>,
) -> AppResult<impl IntoResponse> {
    if let Some(status) = input.status.as_deref() {
        litters::validate_status(status)?;
    }
    litters::validate_dates(input.breeding_date, input.whelp_date, input.puppy_count)?;
    validate::non_negative_cents("price_cents", input.price_cents)?;
    check_parents(&state.pool, None, Some(input.dam_id), input.sire_id).await?;

    input.expected_whelp_date =
        litters::resolve_expected_whelp_date(input.expected_whelp_date, input.breeding_date);

    let litter = LitterRepo::create(&state.pool, &input).await?;

    tracing::info!(litter_id = litter.id, dam_id = litter.dam_id, "Litter created");

    fire_litter_triggers(&state.pool, None, &litter).await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: litter })))
}

/// PUT /api/litters/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateLitter>,
) -> AppResult<impl IntoResponse> {
    let existing = LitterRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Litter", id))?;

    if let Some(status) = input.status.as_deref() {
        litters::validate_status(status)?;
    }
    litters::validate_dates(
        input.breeding_date.or(existing.breeding_date),
        input.whelp_date.or(existing.whelp_date),
        input.puppy_count,
    )?;
    validate::non_negative_cents("price_cents", input.price_cents)?;
    if input.dam_id.is_some() || input.sire_id.is_some() {
        check_parents(
            &state.pool,
            None,
            input.dam_id.or(Some(existing.dam_id)),
            input.sire_id.or(existing.sire_id),
        )
        .await?;
    }

    // A moved breeding date moves the derived expected whelp date with it.
    if input.expected_whelp_date.is_none() && became_set(existing.breeding_date, input.breeding_date) {
        input.expected_whelp_date =
            litters::resolve_expected_whelp_date(None, input.breeding_date);
    }

    let litter = LitterRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Litter", id))?;

    tracing::info!(litter_id = id, status = %litter.status, "Litter updated");

    fire_litter_triggers(&state.pool, Some(&existing), &litter).await;

    Ok(Json(DataResponse { data: litter }))
}

/// DELETE /api/litters/{id}
///
/// Puppies are removed by cascade; photos of the litter and its puppies are
/// removed here.
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let puppies = PuppyRepo::list_by_litter(&state.pool, id).await?;

    if !LitterRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Litter", id));
    }

    let mut photos = PhotoRepo::delete_for_entity(&state.pool, ENTITY_LITTER, id).await?;
    for puppy in &puppies {
        photos.extend(PhotoRepo::delete_for_entity(&state.pool, ENTITY_PUPPY, puppy.id).await?);
    }
    remove_photo_files(&state, &photos).await;

    tracing::info!(litter_id = id, puppies = puppies.len(), "Litter deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/litters/{id}/puppies
pub async fn puppies(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(mut params): Query<PuppyListParams>,
) -> AppResult<impl IntoResponse> {
    LitterRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Litter", id))?;

    params.litter_id = Some(id);
    let items = PuppyRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/litters/{id}/events/generate
///
/// Creates pregnancy milestones from the breeding date and development
/// milestones from the whelp date. Milestones already on the calendar for
/// this litter (same title and date) are skipped; only new events are
/// returned.
pub async fn generate_events(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let litter = LitterRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Litter", id))?;

    if litter.breeding_date.is_none() && litter.whelp_date.is_none() {
        return Err(AppError::Core(CoreError::Validation(
            "Litter needs a breeding_date or whelp_date to generate milestones".into(),
        )));
    }

    let label = litter.label();
    let planned = milestones::litter_milestones(litter.breeding_date, litter.whelp_date, Some(&label));

    let subject = EventSubject {
        litter_id: Some(id),
        ..Default::default()
    };
    let existing = EventRepo::existing_keys(&state.pool, subject).await?;
    let planned = calendar::drop_existing(planned, &existing);

    let events = EventRepo::create_planned(&state.pool, &planned, subject, None).await?;

    tracing::info!(litter_id = id, count = events.len(), "Litter milestones generated");

    Ok((StatusCode::CREATED, Json(DataResponse { data: events })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> Date {
        Date::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn became_set_only_on_new_or_moved_dates() {
        assert!(became_set(None, Some(date(1))));
        assert!(became_set(Some(date(1)), Some(date(2))));
        assert!(!became_set(Some(date(1)), Some(date(1))));
        assert!(!became_set(Some(date(1)), None));
        assert!(!became_set(None, None));
    }
}
