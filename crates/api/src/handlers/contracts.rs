//! Handlers for the `/contracts` resource.
//!
//! Contracts move `draft -> sent -> signed`, and may be cancelled from
//! `draft` or `sent`. Only drafts are editable.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use kennel_core::contracts::{self, STATUS_CANCELLED, STATUS_SENT, STATUS_SIGNED};
use kennel_core::error::CoreError;
use kennel_core::types::DbId;
use kennel_core::uploads;
use kennel_core::validate;
use kennel_db::models::contract::{
    Contract, ContractListParams, CreateContract, SignContract, UpdateContract,
};
use kennel_db::repositories::{ContractRepo, CustomerRepo, PuppyRepo, SignOutcome};
use kennel_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::triggers;

async fn find_contract(pool: &DbPool, id: DbId) -> AppResult<Contract> {
    ContractRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::not_found("Contract", id))
}

/// A guarded transition matched no row: the contract moved underneath us.
fn lost_race(id: DbId, to: &str) -> AppError {
    AppError::Core(CoreError::Conflict(format!(
        "Contract {id} changed status before it could be moved to '{to}'"
    )))
}

/// GET /api/contracts
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ContractListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(status) = params.status.as_deref() {
        validate::one_of("status", status, contracts::VALID_STATUSES)?;
    }
    let items = ContractRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/contracts/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let contract = find_contract(&state.pool, id).await?;
    Ok(Json(DataResponse { data: contract }))
}

/// POST /api/contracts
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateContract>,
) -> AppResult<impl IntoResponse> {
    validate::non_empty("title", &input.title)?;
    if let Some(contract_type) = input.contract_type.as_deref() {
        contracts::validate_contract_type(contract_type)?;
    }
    contracts::validate_amounts(input.price_cents, input.deposit_cents)?;

    CustomerRepo::find_by_id(&state.pool, input.customer_id)
        .await?
        .ok_or(AppError::not_found("Customer", input.customer_id))?;
    if let Some(puppy_id) = input.puppy_id {
        PuppyRepo::find_by_id(&state.pool, puppy_id)
            .await?
            .ok_or(AppError::not_found("Puppy", puppy_id))?;
    }

    let contract = ContractRepo::create(&state.pool, &input).await?;

    tracing::info!(
        contract_id = contract.id,
        customer_id = contract.customer_id,
        "Contract drafted"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: contract })))
}

/// PUT /api/contracts/{id}
///
/// Editing anything but a draft is a 409.
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContract>,
) -> AppResult<impl IntoResponse> {
    let existing = find_contract(&state.pool, id).await?;
    contracts::ensure_editable(&existing.status)?;

    if let Some(title) = input.title.as_deref() {
        validate::non_empty("title", title)?;
    }
    if let Some(contract_type) = input.contract_type.as_deref() {
        contracts::validate_contract_type(contract_type)?;
    }
    contracts::validate_amounts(
        input.price_cents.or(existing.price_cents),
        input.deposit_cents.or(existing.deposit_cents),
    )?;

    let contract = ContractRepo::update_draft(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(format!(
                "Contract {id} is no longer a draft"
            )))
        })?;
    Ok(Json(DataResponse { data: contract }))
}

/// POST /api/contracts/{id}/document
///
/// Multipart field `file`: a PDF or Word document. Replaces any previous
/// document.
pub async fn upload_document(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let existing = find_contract(&state.pool, id).await?;

    let mut file_data: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            file_data = Some((filename, data.to_vec()));
        }
    }
    let (filename, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    let ext = uploads::validate_extension(&filename, uploads::DOCUMENT_EXTENSIONS)?;
    uploads::validate_size(data.len(), state.config.max_upload_bytes)?;

    let stored_name = uploads::random_filename(&ext);
    let url = state
        .document_store
        .save("contracts", &stored_name, data, uploads::content_type_for(&ext))
        .await?;

    let contract = ContractRepo::set_document_url(&state.pool, id, &url)
        .await?
        .ok_or(AppError::not_found("Contract", id))?;

    if let Some(previous) = existing.document_url.as_deref() {
        if let Err(e) = state.document_store.delete(previous).await {
            tracing::warn!(contract_id = id, url = %previous, error = %e, "Failed to remove replaced document");
        }
    }

    tracing::info!(contract_id = id, url = %url, "Contract document uploaded");

    Ok(Json(DataResponse { data: contract }))
}

/// POST /api/contracts/{id}/send
pub async fn send(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = find_contract(&state.pool, id).await?;
    contracts::validate_transition(&existing.status, STATUS_SENT)?;

    let contract = ContractRepo::mark_sent(&state.pool, id)
        .await?
        .ok_or_else(|| lost_race(id, STATUS_SENT))?;

    tracing::info!(contract_id = id, "Contract sent");

    Ok(Json(DataResponse { data: contract }))
}

/// POST /api/contracts/{id}/sign
///
/// Signing a sale contract that names a puppy also marks the puppy sold to
/// the contract's customer, which fires the `puppy_sold` rules. A puppy
/// already sold to another customer is a 409 and the contract stays `sent`.
pub async fn sign(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SignContract>,
) -> AppResult<impl IntoResponse> {
    validate::non_empty("signed_by", &input.signed_by)?;
    let existing = find_contract(&state.pool, id).await?;
    contracts::validate_transition(&existing.status, STATUS_SIGNED)?;

    let (contract, sold) = match ContractRepo::sign(&state.pool, id, input.signed_by.trim()).await? {
        SignOutcome::Signed { contract, sold } => (contract, sold),
        SignOutcome::NotSent => return Err(lost_race(id, STATUS_SIGNED)),
        SignOutcome::PuppyAlreadySold { puppy_id } => {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Puppy {puppy_id} is already sold to another customer"
            ))))
        }
    };

    tracing::info!(
        contract_id = id,
        signed_by = %contract.signed_by.as_deref().unwrap_or_default(),
        puppy_sold = ?sold.as_ref().map(|p| p.id),
        "Contract signed"
    );

    if let Some(puppy) = sold {
        triggers::fire(
            &state.pool,
            Some(triggers::puppy_sold_trigger(&puppy, Utc::now().date_naive())),
        )
        .await;
    }

    Ok(Json(DataResponse { data: contract }))
}

/// POST /api/contracts/{id}/cancel
pub async fn cancel(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = find_contract(&state.pool, id).await?;
    contracts::validate_transition(&existing.status, STATUS_CANCELLED)?;

    let contract = ContractRepo::cancel(&state.pool, id)
        .await?
        .ok_or_else(|| lost_race(id, STATUS_CANCELLED))?;

    tracing::info!(contract_id = id, "Contract cancelled");

    Ok(Json(DataResponse { data: contract }))
}

/// DELETE /api/contracts/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = find_contract(&state.pool, id).await?;
    if !ContractRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Contract", id));
    }

    if let Some(url) = existing.document_url.as_deref() {
        if let Err(e) = state.document_store.delete(url).await {
            tracing::warn!(contract_id = id, url = %url, error = %e, "Failed to remove contract document");
        }
    }

    tracing::info!(contract_id = id, "Contract deleted");

    Ok(StatusCode::NO_CONTENT)
}
