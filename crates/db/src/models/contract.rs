//! Contract entity model and DTOs.

use kennel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `contracts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contract {
    pub id: DbId,
    pub customer_id: DbId,
    pub puppy_id: Option<DbId>,
    pub title: String,
    pub contract_type: String,
    pub status: String,
    pub price_cents: Option<i64>,
    pub deposit_cents: Option<i64>,
    pub terms: Option<String>,
    pub document_url: Option<String>,
    pub sent_at: Option<Timestamp>,
    pub signed_at: Option<Timestamp>,
    pub signed_by: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a contract. New contracts start as `draft`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContract {
    pub customer_id: DbId,
    pub puppy_id: Option<DbId>,
    pub title: String,
    /// Defaults to `sale`.
    pub contract_type: Option<String>,
    pub price_cents: Option<i64>,
    pub deposit_cents: Option<i64>,
    pub terms: Option<String>,
}

/// DTO for editing a draft contract. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateContract {
    pub puppy_id: Option<DbId>,
    pub title: Option<String>,
    pub contract_type: Option<String>,
    pub price_cents: Option<i64>,
    pub deposit_cents: Option<i64>,
    pub terms: Option<String>,
}

/// Query-string filters for listing contracts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractListParams {
    pub customer_id: Option<DbId>,
    pub puppy_id: Option<DbId>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `POST /contracts/{id}/sign`.
#[derive(Debug, Clone, Deserialize)]
pub struct SignContract {
    pub signed_by: String,
}
