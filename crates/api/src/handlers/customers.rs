//! Handlers for the `/customers` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kennel_core::contacts;
use kennel_core::types::DbId;
use kennel_db::models::contract::ContractListParams;
use kennel_db::models::customer::{CreateCustomer, CustomerListParams, UpdateCustomer};
use kennel_db::models::message::MessageListParams;
use kennel_db::models::puppy::PuppyListParams;
use kennel_db::repositories::{ContractRepo, CustomerRepo, MessageRepo, PuppyRepo};
use kennel_db::DbPool;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Paging for the customer sub-resource lists.
#[derive(Debug, Default, Deserialize)]
pub struct Paging {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Trim, validate and lowercase an optional email; blank becomes `None`.
pub(crate) fn clean_email(email: Option<String>) -> AppResult<Option<String>> {
    let email = email
        .map(|e| contacts::normalize_email(&e))
        .filter(|e| !e.is_empty());
    contacts::validate_email(email.as_deref())?;
    Ok(email)
}

/// GET /api/customers
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<CustomerListParams>,
) -> AppResult<impl IntoResponse> {
    let items = CustomerRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/customers/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let customer = CustomerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Customer", id))?;
    Ok(Json(DataResponse { data: customer }))
}

/// POST /api/customers
///
/// A duplicate email is rejected by `uq_customers_email` (409).
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<CreateCustomer>,
) -> AppResult<impl IntoResponse> {
    contacts::validate_names(&input.first_name, input.last_name.as_deref())?;
    input.email = clean_email(input.email.take())?;

    let customer = CustomerRepo::create(&state.pool, &input).await?;

    tracing::info!(customer_id = customer.id, "Customer created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: customer })))
}

/// PUT /api/customers/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateCustomer>,
) -> AppResult<impl IntoResponse> {
    if let Some(first_name) = input.first_name.as_deref() {
        contacts::validate_names(first_name, input.last_name.as_deref())?;
    }
    input.email = clean_email(input.email.take())?;

    let customer = CustomerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Customer", id))?;

    tracing::info!(customer_id = id, "Customer updated");

    Ok(Json(DataResponse { data: customer }))
}

/// DELETE /api/customers/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CustomerRepo::delete(&state.pool, id).await? {
        tracing::info!(customer_id = id, "Customer deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Customer", id))
    }
}

/// GET /api/customers/{id}/puppies
pub async fn puppies(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(paging): Query<Paging>,
) -> AppResult<impl IntoResponse> {
    ensure_customer_exists(&state.pool, id).await?;
    let params = PuppyListParams {
        customer_id: Some(id),
        limit: paging.limit,
        offset: paging.offset,
        ..Default::default()
    };
    let items = PuppyRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/customers/{id}/contracts
pub async fn contracts(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(paging): Query<Paging>,
) -> AppResult<impl IntoResponse> {
    ensure_customer_exists(&state.pool, id).await?;
    let params = ContractListParams {
        customer_id: Some(id),
        limit: paging.limit,
        offset: paging.offset,
        ..Default::default()
    };
    let items = ContractRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/customers/{id}/messages
pub async fn messages(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(paging): Query<Paging>,
) -> AppResult<impl IntoResponse> {
    ensure_customer_exists(&state.pool, id).await?;
    let params = MessageListParams {
        customer_id: Some(id),
        limit: paging.limit,
        offset: paging.offset,
        ..Default::default()
    };
    let items = MessageRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: items }))
}

async fn ensure_customer_exists(pool: &DbPool, id: DbId) -> AppResult<()> {
    CustomerRepo::find_by_id(pool, id)
        .await?
        .map(|_| ())
        .ok_or(AppError::not_found("Customer", id))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use kennel_core::error::CoreError;

    use super::*;

    #[test]
    fn clean_email_normalizes_and_drops_blank() {
        assert_eq!(
            clean_email(Some("  Jane@Example.COM ".into())).unwrap(),
            Some("jane@example.com".into())
        );
        assert_eq!(clean_email(Some("   ".into())).unwrap(), None);
        assert_eq!(clean_email(None).unwrap(), None);
    }

    #[test]
    fn clean_email_rejects_malformed() {
        assert_matches!(
            clean_email(Some("not-an-email".into())),
            Err(AppError::Core(CoreError::Validation(_)))
        );
    }
}
