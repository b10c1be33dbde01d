//! Repositories for the `health_records` and `vaccinations` tables.

use kennel_core::pagination::{clamp_offset, list_limit};
use kennel_core::types::{Date, DbId};
use sqlx::PgPool;

use crate::models::health::{
    CreateHealthRecord, CreateVaccination, DueVaccinationRow, HealthRecord,
    HealthRecordListParams, UpdateHealthRecord, UpdateVaccination, Vaccination,
    VaccinationListParams,
};

// ---------------------------------------------------------------------------
// Health records
// ---------------------------------------------------------------------------

const RECORD_COLUMNS: &str = "id, dog_id, puppy_id, record_type, title, description, \
    record_date, veterinarian, symptoms, results, document_url, created_at, updated_at";

/// Provides CRUD operations for health records.
pub struct HealthRecordRepo;

impl HealthRecordRepo {
    /// Insert a new health record. `symptoms` defaults to `[]`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateHealthRecord,
    ) -> Result<HealthRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO health_records (dog_id, puppy_id, record_type, title, description, \
                record_date, veterinarian, symptoms, results, document_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, '[]'::jsonb), $9, $10)
             RETURNING {RECORD_COLUMNS}"
        );
        sqlx::query_as::<_, HealthRecord>(&query)
            .bind(input.dog_id)
            .bind(input.puppy_id)
            .bind(&input.record_type)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.record_date)
            .bind(&input.veterinarian)
            .bind(&input.symptoms)
            .bind(&input.results)
            .bind(&input.document_url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<HealthRecord>, sqlx::Error> {
        let query = format!("SELECT {RECORD_COLUMNS} FROM health_records WHERE id = $1");
        sqlx::query_as::<_, HealthRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List health records, most recent first.
    pub async fn list(
        pool: &PgPool,
        params: &HealthRecordListParams,
    ) -> Result<Vec<HealthRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {RECORD_COLUMNS} FROM health_records
             WHERE ($1::BIGINT IS NULL OR dog_id = $1)
               AND ($2::BIGINT IS NULL OR puppy_id = $2)
               AND ($3::TEXT IS NULL OR record_type = $3)
             ORDER BY record_date DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, HealthRecord>(&query)
            .bind(params.dog_id)
            .bind(params.puppy_id)
            .bind(&params.record_type)
            .bind(list_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Every health record of a dog, unpaginated.
    pub async fn list_for_dog(pool: &PgPool, dog_id: DbId) -> Result<Vec<HealthRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {RECORD_COLUMNS} FROM health_records WHERE dog_id = $1 \
             ORDER BY record_date DESC, id DESC"
        );
        sqlx::query_as::<_, HealthRecord>(&query)
            .bind(dog_id)
            .fetch_all(pool)
            .await
    }

    /// Update a health record. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateHealthRecord,
    ) -> Result<Option<HealthRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE health_records SET
                record_type = COALESCE($2, record_type),
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                record_date = COALESCE($5, record_date),
                veterinarian = COALESCE($6, veterinarian),
                symptoms = COALESCE($7, symptoms),
                results = COALESCE($8, results),
                document_url = COALESCE($9, document_url)
             WHERE id = $1
             RETURNING {RECORD_COLUMNS}"
        );
        sqlx::query_as::<_, HealthRecord>(&query)
            .bind(id)
            .bind(&input.record_type)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.record_date)
            .bind(&input.veterinarian)
            .bind(&input.symptoms)
            .bind(&input.results)
            .bind(&input.document_url)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM health_records WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Vaccinations
// ---------------------------------------------------------------------------

const VACCINATION_COLUMNS: &str = "id, dog_id, puppy_id, vaccine_name, administered_date, \
    next_due_date, administered_by, lot_number, notes, created_at, updated_at";

/// Provides CRUD operations and the due report for vaccinations.
pub struct VaccinationRepo;

impl VaccinationRepo {
    pub async fn create(pool: &PgPool, input: &CreateVaccination) -> Result<Vaccination, sqlx::Error> {
        let query = format!(
            "INSERT INTO vaccinations (dog_id, puppy_id, vaccine_name, administered_date, \
                next_due_date, administered_by, lot_number, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {VACCINATION_COLUMNS}"
        );
        sqlx::query_as::<_, Vaccination>(&query)
            .bind(input.dog_id)
            .bind(input.puppy_id)
            .bind(&input.vaccine_name)
            .bind(input.administered_date)
            .bind(input.next_due_date)
            .bind(&input.administered_by)
            .bind(&input.lot_number)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Vaccination>, sqlx::Error> {
        let query = format!("SELECT {VACCINATION_COLUMNS} FROM vaccinations WHERE id = $1");
        sqlx::query_as::<_, Vaccination>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List vaccinations, most recently administered first.
    pub async fn list(
        pool: &PgPool,
        params: &VaccinationListParams,
    ) -> Result<Vec<Vaccination>, sqlx::Error> {
        let query = format!(
            "SELECT {VACCINATION_COLUMNS} FROM vaccinations
             WHERE ($1::BIGINT IS NULL OR dog_id = $1)
               AND ($2::BIGINT IS NULL OR puppy_id = $2)
             ORDER BY administered_date DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Vaccination>(&query)
            .bind(params.dog_id)
            .bind(params.puppy_id)
            .bind(list_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Every vaccination of a dog, unpaginated.
    pub async fn list_for_dog(pool: &PgPool, dog_id: DbId) -> Result<Vec<Vaccination>, sqlx::Error> {
        let query = format!(
            "SELECT {VACCINATION_COLUMNS} FROM vaccinations WHERE dog_id = $1 \
             ORDER BY administered_date DESC, id DESC"
        );
        sqlx::query_as::<_, Vaccination>(&query)
            .bind(dog_id)
            .fetch_all(pool)
            .await
    }

    /// Vaccinations whose next dose is due on or before `until` (overdue included),
    /// soonest first, with the dog or puppy name attached.
    pub async fn list_due(pool: &PgPool, until: Date) -> Result<Vec<DueVaccinationRow>, sqlx::Error> {
        let query = "SELECT v.id, v.dog_id, v.puppy_id, v.vaccine_name, v.administered_date, \
                v.next_due_date, v.administered_by, v.lot_number, v.notes, v.created_at, \
                v.updated_at, COALESCE(d.name, p.name, p.collar_color) AS subject_name
             FROM vaccinations v
             LEFT JOIN dogs d ON d.id = v.dog_id
             LEFT JOIN puppies p ON p.id = v.puppy_id
             WHERE v.next_due_date IS NOT NULL AND v.next_due_date <= $1
             ORDER BY v.next_due_date, v.id";
        sqlx::query_as::<_, DueVaccinationRow>(query)
            .bind(until)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVaccination,
    ) -> Result<Option<Vaccination>, sqlx::Error> {
        let query = format!(
            "UPDATE vaccinations SET
                vaccine_name = COALESCE($2, vaccine_name),
                administered_date = COALESCE($3, administered_date),
                next_due_date = COALESCE($4, next_due_date),
                administered_by = COALESCE($5, administered_by),
                lot_number = COALESCE($6, lot_number),
                notes = COALESCE($7, notes)
             WHERE id = $1
             RETURNING {VACCINATION_COLUMNS}"
        );
        sqlx::query_as::<_, Vaccination>(&query)
            .bind(id)
            .bind(&input.vaccine_name)
            .bind(input.administered_date)
            .bind(input.next_due_date)
            .bind(&input.administered_by)
            .bind(&input.lot_number)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM vaccinations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
