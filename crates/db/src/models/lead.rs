//! Lead entity model and DTOs.

use kennel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::customer::Customer;

/// A row from the `leads` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lead {
    pub id: DbId,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub status: String,
    pub message: Option<String>,
    pub customer_id: Option<DbId>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a lead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateLead {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    /// Defaults to `new`.
    pub status: Option<String>,
    pub message: Option<String>,
    pub notes: Option<String>,
}

/// DTO for updating a lead. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLead {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub status: Option<String>,
    pub message: Option<String>,
    pub notes: Option<String>,
}

/// Query-string filters for listing leads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadListParams {
    pub status: Option<String>,
    pub source: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Result of converting a lead into a customer.
#[derive(Debug, Clone, Serialize)]
pub struct LeadConversion {
    pub lead: Lead,
    pub customer: Customer,
    /// `false` when an existing customer with the same email was reused.
    pub customer_created: bool,
}
