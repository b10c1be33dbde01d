//! Handlers for health records and vaccinations (`/health/...`).
//!
//! Not to be confused with the service health check in `routes::health`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Duration, Utc};
use kennel_core::health;
use kennel_core::types::DbId;
use kennel_core::validate;
use kennel_db::models::health::{
    CreateHealthRecord, CreateVaccination, DueVaccination, DueVaccinationParams,
    HealthRecordListParams, UpdateHealthRecord, UpdateVaccination, VaccinationListParams,
};
use kennel_db::repositories::{HealthRecordRepo, VaccinationRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::triggers;

// ---------------------------------------------------------------------------
// Health records
// ---------------------------------------------------------------------------

/// GET /api/health/records
pub async fn list_records(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<HealthRecordListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(record_type) = params.record_type.as_deref() {
        health::validate_record_type(record_type)?;
    }
    let items = HealthRecordRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/health/records/{id}
pub async fn get_record(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let record = HealthRecordRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("HealthRecord", id))?;
    Ok(Json(DataResponse { data: record }))
}

/// POST /api/health/records
pub async fn create_record(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateHealthRecord>,
) -> AppResult<impl IntoResponse> {
    validate::exactly_one("dog_id", input.dog_id, "puppy_id", input.puppy_id)?;
    health::validate_record_type(&input.record_type)?;
    validate::non_empty("title", &input.title)?;
    if let Some(symptoms) = &input.symptoms {
        health::validate_symptoms(symptoms)?;
    }

    let record = HealthRecordRepo::create(&state.pool, &input).await?;

    tracing::info!(
        record_id = record.id,
        dog_id = ?record.dog_id,
        puppy_id = ?record.puppy_id,
        record_type = %record.record_type,
        "Health record created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// PUT /api/health/records/{id}
pub async fn update_record(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateHealthRecord>,
) -> AppResult<impl IntoResponse> {
    if let Some(record_type) = input.record_type.as_deref() {
        health::validate_record_type(record_type)?;
    }
    if let Some(title) = input.title.as_deref() {
        validate::non_empty("title", title)?;
    }
    if let Some(symptoms) = &input.symptoms {
        health::validate_symptoms(symptoms)?;
    }

    let record = HealthRecordRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("HealthRecord", id))?;
    Ok(Json(DataResponse { data: record }))
}

/// DELETE /api/health/records/{id}
pub async fn delete_record(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if HealthRecordRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("HealthRecord", id))
    }
}

// ---------------------------------------------------------------------------
// Vaccinations
// ---------------------------------------------------------------------------

/// GET /api/health/vaccinations
pub async fn list_vaccinations(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<VaccinationListParams>,
) -> AppResult<impl IntoResponse> {
    let items = VaccinationRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/health/vaccinations/due?within_days=N
///
/// Vaccinations overdue or due within `within_days` (default 30), soonest
/// first, each labelled `overdue` or `due_soon`.
pub async fn due_vaccinations(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<DueVaccinationParams>,
) -> AppResult<impl IntoResponse> {
    let within_days = health::clamp_within_days(params.within_days);
    let today = Utc::now().date_naive();
    let until = today + Duration::days(within_days);

    let rows = VaccinationRepo::list_due(&state.pool, until).await?;
    let items: Vec<DueVaccination> = rows
        .into_iter()
        .filter_map(|row| {
            let due = row.vaccination.next_due_date?;
            Some(DueVaccination {
                due_state: health::classify_due(due, today, within_days),
                row,
            })
        })
        .collect();

    Ok(Json(DataResponse { data: items }))
}

/// GET /api/health/vaccinations/{id}
pub async fn get_vaccination(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let vaccination = VaccinationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Vaccination", id))?;
    Ok(Json(DataResponse { data: vaccination }))
}

/// POST /api/health/vaccinations
///
/// Fires the `vaccination_recorded` rules.
pub async fn create_vaccination(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateVaccination>,
) -> AppResult<impl IntoResponse> {
    validate::exactly_one("dog_id", input.dog_id, "puppy_id", input.puppy_id)?;
    validate::non_empty("vaccine_name", &input.vaccine_name)?;
    health::validate_vaccination_dates(input.administered_date, input.next_due_date)?;

    let vaccination = VaccinationRepo::create(&state.pool, &input).await?;

    tracing::info!(
        vaccination_id = vaccination.id,
        vaccine = %vaccination.vaccine_name,
        "Vaccination recorded"
    );

    let label = triggers::vaccination_subject_label(&state.pool, &vaccination).await?;
    triggers::fire(
        &state.pool,
        Some(triggers::vaccination_trigger(&vaccination, label)),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: vaccination })))
}

/// PUT /api/health/vaccinations/{id}
pub async fn update_vaccination(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateVaccination>,
) -> AppResult<impl IntoResponse> {
    let existing = VaccinationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Vaccination", id))?;

    if let Some(name) = input.vaccine_name.as_deref() {
        validate::non_empty("vaccine_name", name)?;
    }
    health::validate_vaccination_dates(
        input.administered_date.unwrap_or(existing.administered_date),
        input.next_due_date.or(existing.next_due_date),
    )?;

    let vaccination = VaccinationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Vaccination", id))?;
    Ok(Json(DataResponse { data: vaccination }))
}

/// DELETE /api/health/vaccinations/{id}
pub async fn delete_vaccination(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if VaccinationRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Vaccination", id))
    }
}
