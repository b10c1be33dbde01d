//! Puppy entity model and DTOs.

use kennel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `puppies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Puppy {
    pub id: DbId,
    pub litter_id: DbId,
    pub name: Option<String>,
    pub collar_color: Option<String>,
    pub gender: String,
    pub color: Option<String>,
    pub birth_weight_oz: Option<f64>,
    pub status: String,
    pub price_cents: Option<i64>,
    pub customer_id: Option<DbId>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Puppy {
    /// Display label: name, then collar color, then id.
    pub fn label(&self) -> String {
        self.name
            .as_deref()
            .or(self.collar_color.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Puppy #{}", self.id))
    }
}

/// DTO for creating a puppy.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePuppy {
    pub litter_id: DbId,
    pub name: Option<String>,
    pub collar_color: Option<String>,
    pub gender: String,
    pub color: Option<String>,
    pub birth_weight_oz: Option<f64>,
    /// Defaults to `available`.
    pub status: Option<String>,
    pub price_cents: Option<i64>,
    pub customer_id: Option<DbId>,
    pub notes: Option<String>,
}

/// DTO for updating a puppy. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePuppy {
    pub name: Option<String>,
    pub collar_color: Option<String>,
    pub gender: Option<String>,
    pub color: Option<String>,
    pub birth_weight_oz: Option<f64>,
    pub status: Option<String>,
    pub price_cents: Option<i64>,
    pub customer_id: Option<DbId>,
    pub notes: Option<String>,
}

/// Query-string filters for listing puppies.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PuppyListParams {
    pub litter_id: Option<DbId>,
    pub status: Option<String>,
    pub customer_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
