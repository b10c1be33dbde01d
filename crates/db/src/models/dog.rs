//! Dog entity model and DTOs.

use kennel_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::photo::Photo;

/// A row from the `dogs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Dog {
    pub id: DbId,
    pub name: String,
    pub call_name: Option<String>,
    pub breed: Option<String>,
    pub gender: String,
    pub color: Option<String>,
    pub date_of_birth: Option<Date>,
    pub registration_number: Option<String>,
    pub microchip_number: Option<String>,
    pub status: String,
    pub is_breeding: bool,
    pub dam_id: Option<DbId>,
    pub sire_id: Option<DbId>,
    pub weight_lbs: Option<f64>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Short parent reference embedded in dog and litter responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DogSummary {
    pub id: DbId,
    pub name: String,
    pub call_name: Option<String>,
    pub gender: String,
}

/// A dog with its parents and photos.
#[derive(Debug, Clone, Serialize)]
pub struct DogDetail {
    #[serde(flatten)]
    pub dog: Dog,
    pub dam: Option<DogSummary>,
    pub sire: Option<DogSummary>,
    pub photos: Vec<Photo>,
}

/// DTO for creating a dog.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDog {
    pub name: String,
    pub call_name: Option<String>,
    pub breed: Option<String>,
    pub gender: String,
    pub color: Option<String>,
    pub date_of_birth: Option<Date>,
    pub registration_number: Option<String>,
    pub microchip_number: Option<String>,
    /// Defaults to `active`.
    pub status: Option<String>,
    pub is_breeding: Option<bool>,
    pub dam_id: Option<DbId>,
    pub sire_id: Option<DbId>,
    pub weight_lbs: Option<f64>,
    pub notes: Option<String>,
}

/// DTO for updating a dog. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDog {
    pub name: Option<String>,
    pub call_name: Option<String>,
    pub breed: Option<String>,
    pub gender: Option<String>,
    pub color: Option<String>,
    pub date_of_birth: Option<Date>,
    pub registration_number: Option<String>,
    pub microchip_number: Option<String>,
    pub status: Option<String>,
    pub is_breeding: Option<bool>,
    pub dam_id: Option<DbId>,
    pub sire_id: Option<DbId>,
    pub weight_lbs: Option<f64>,
    pub notes: Option<String>,
}

/// Query-string filters for listing dogs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DogListParams {
    pub gender: Option<String>,
    pub status: Option<String>,
    pub is_breeding: Option<bool>,
    /// Case-insensitive name substring.
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Health history of a single dog.
#[derive(Debug, Clone, Serialize)]
pub struct DogHealth {
    pub records: Vec<crate::models::health::HealthRecord>,
    pub vaccinations: Vec<crate::models::health::Vaccination>,
}
