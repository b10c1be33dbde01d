//! Health record and vaccination models and DTOs.

use kennel_core::health::DueState;
use kennel_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Health records
// ---------------------------------------------------------------------------

/// A row from the `health_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HealthRecord {
    pub id: DbId,
    pub dog_id: Option<DbId>,
    pub puppy_id: Option<DbId>,
    pub record_type: String,
    pub title: String,
    pub description: Option<String>,
    pub record_date: Date,
    pub veterinarian: Option<String>,
    pub symptoms: serde_json::Value,
    pub results: Option<String>,
    pub document_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a health record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateHealthRecord {
    pub dog_id: Option<DbId>,
    pub puppy_id: Option<DbId>,
    pub record_type: String,
    pub title: String,
    pub description: Option<String>,
    pub record_date: Date,
    pub veterinarian: Option<String>,
    /// Array of symptom strings; defaults to `[]`.
    pub symptoms: Option<serde_json::Value>,
    pub results: Option<String>,
    pub document_url: Option<String>,
}

/// DTO for updating a health record. The owning dog/puppy cannot change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateHealthRecord {
    pub record_type: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub record_date: Option<Date>,
    pub veterinarian: Option<String>,
    pub symptoms: Option<serde_json::Value>,
    pub results: Option<String>,
    pub document_url: Option<String>,
}

/// Query-string filters for listing health records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthRecordListParams {
    pub dog_id: Option<DbId>,
    pub puppy_id: Option<DbId>,
    pub record_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Vaccinations
// ---------------------------------------------------------------------------

/// A row from the `vaccinations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vaccination {
    pub id: DbId,
    pub dog_id: Option<DbId>,
    pub puppy_id: Option<DbId>,
    pub vaccine_name: String,
    pub administered_date: Date,
    pub next_due_date: Option<Date>,
    pub administered_by: Option<String>,
    pub lot_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a vaccination.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVaccination {
    pub dog_id: Option<DbId>,
    pub puppy_id: Option<DbId>,
    pub vaccine_name: String,
    pub administered_date: Date,
    pub next_due_date: Option<Date>,
    pub administered_by: Option<String>,
    pub lot_number: Option<String>,
    pub notes: Option<String>,
}

/// DTO for updating a vaccination. The owning dog/puppy cannot change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateVaccination {
    pub vaccine_name: Option<String>,
    pub administered_date: Option<Date>,
    pub next_due_date: Option<Date>,
    pub administered_by: Option<String>,
    pub lot_number: Option<String>,
    pub notes: Option<String>,
}

/// Query-string filters for listing vaccinations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VaccinationListParams {
    pub dog_id: Option<DbId>,
    pub puppy_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query-string parameters for the due-vaccinations report.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DueVaccinationParams {
    pub within_days: Option<i64>,
}

/// A vaccination due soon or overdue, joined with its subject's name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DueVaccinationRow {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub vaccination: Vaccination,
    pub subject_name: Option<String>,
}

/// A due-vaccination report entry.
#[derive(Debug, Clone, Serialize)]
pub struct DueVaccination {
    #[serde(flatten)]
    pub row: DueVaccinationRow,
    pub due_state: DueState,
}
