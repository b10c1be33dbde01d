//! Handlers for the `/leads` resource and lead-to-customer conversion.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kennel_core::contacts;
use kennel_core::error::CoreError;
use kennel_core::types::DbId;
use kennel_db::models::lead::{CreateLead, LeadListParams, UpdateLead};
use kennel_db::repositories::LeadRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::customers::clean_email;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/leads
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<LeadListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(status) = params.status.as_deref() {
        contacts::validate_lead_status(status)?;
    }
    let items = LeadRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/leads/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let lead = LeadRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Lead", id))?;
    Ok(Json(DataResponse { data: lead }))
}

/// POST /api/leads
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<CreateLead>,
) -> AppResult<impl IntoResponse> {
    contacts::validate_names(&input.first_name, input.last_name.as_deref())?;
    if let Some(status) = input.status.as_deref() {
        contacts::validate_lead_status(status)?;
        // Conversion links a customer; a lead cannot start out converted.
        contacts::ensure_convertible(status)?;
    }
    input.email = clean_email(input.email.take())?;

    let lead = LeadRepo::create(&state.pool, &input).await?;

    tracing::info!(lead_id = lead.id, source = ?lead.source, "Lead created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: lead })))
}

/// PUT /api/leads/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateLead>,
) -> AppResult<impl IntoResponse> {
    if let Some(first_name) = input.first_name.as_deref() {
        contacts::validate_names(first_name, input.last_name.as_deref())?;
    }
    if let Some(status) = input.status.as_deref() {
        contacts::validate_lead_status(status)?;
        if status == contacts::LEAD_STATUS_CONVERTED {
            return Err(AppError::Core(CoreError::Validation(
                "Use POST /api/leads/{id}/convert to convert a lead".into(),
            )));
        }
    }
    input.email = clean_email(input.email.take())?;

    let lead = LeadRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Lead", id))?;

    tracing::info!(lead_id = id, status = %lead.status, "Lead updated");

    Ok(Json(DataResponse { data: lead }))
}

/// DELETE /api/leads/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if LeadRepo::delete(&state.pool, id).await? {
        tracing::info!(lead_id = id, "Lead deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Lead", id))
    }
}

/// POST /api/leads/{id}/convert
///
/// Creates a customer from the lead, or links the existing customer with the
/// same email, and marks the lead converted. All in one transaction.
pub async fn convert(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let lead = LeadRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Lead", id))?;
    contacts::ensure_convertible(&lead.status)?;

    // `None` here means another request converted the lead in between.
    let conversion = LeadRepo::convert(&state.pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "Lead has already been converted to a customer".into(),
        ))
    })?;

    tracing::info!(
        lead_id = id,
        customer_id = conversion.customer.id,
        customer_created = conversion.customer_created,
        "Lead converted"
    );

    Ok(Json(DataResponse { data: conversion }))
}
