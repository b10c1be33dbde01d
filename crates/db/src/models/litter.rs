//! Litter entity model and DTOs.

use kennel_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::puppy::Puppy;

/// A row from the `litters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Litter {
    pub id: DbId,
    pub name: Option<String>,
    pub dam_id: DbId,
    pub sire_id: Option<DbId>,
    pub breeding_date: Option<Date>,
    pub expected_whelp_date: Option<Date>,
    pub whelp_date: Option<Date>,
    pub status: String,
    pub puppy_count: Option<i32>,
    pub price_cents: Option<i64>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Litter {
    /// Display label used in generated event titles.
    ///
    /// Falls back to "Litter #id" when the litter has no name.
    pub fn label(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Litter #{}", self.id),
        }
    }
}

/// A litter joined with its parents' names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LitterWithParents {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub litter: Litter,
    pub dam_name: Option<String>,
    pub sire_name: Option<String>,
}

/// A litter with its parents and puppies.
#[derive(Debug, Clone, Serialize)]
pub struct LitterDetail {
    #[serde(flatten)]
    pub litter: LitterWithParents,
    pub puppies: Vec<Puppy>,
}

/// DTO for creating a litter.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLitter {
    pub name: Option<String>,
    pub dam_id: DbId,
    pub sire_id: Option<DbId>,
    pub breeding_date: Option<Date>,
    /// Derived from `breeding_date` when omitted.
    pub expected_whelp_date: Option<Date>,
    pub whelp_date: Option<Date>,
    /// Defaults to `planned`.
    pub status: Option<String>,
    pub puppy_count: Option<i32>,
    pub price_cents: Option<i64>,
    pub notes: Option<String>,
}

/// DTO for updating a litter. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLitter {
    pub name: Option<String>,
    pub dam_id: Option<DbId>,
    pub sire_id: Option<DbId>,
    pub breeding_date: Option<Date>,
    pub expected_whelp_date: Option<Date>,
    pub whelp_date: Option<Date>,
    pub status: Option<String>,
    pub puppy_count: Option<i32>,
    pub price_cents: Option<i64>,
    pub notes: Option<String>,
}

/// Query-string filters for listing litters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LitterListParams {
    pub status: Option<String>,
    pub dam_id: Option<DbId>,
    pub sire_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
