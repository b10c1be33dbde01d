//! Repository for the `dogs` table.

use kennel_core::pagination::{clamp_offset, list_limit};
use kennel_core::search::filter_pattern;
use kennel_core::types::DbId;
use sqlx::PgPool;

use crate::models::dog::{CreateDog, Dog, DogListParams, DogSummary, UpdateDog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, call_name, breed, gender, color, date_of_birth, \
    registration_number, microchip_number, status, is_breeding, dam_id, sire_id, \
    weight_lbs, notes, created_at, updated_at";

/// Provides CRUD operations for dogs.
pub struct DogRepo;

impl DogRepo {
    /// Insert a new dog, returning the created row.
    ///
    /// `status` defaults to `active` and `is_breeding` to `false`.
    pub async fn create(pool: &PgPool, input: &CreateDog) -> Result<Dog, sqlx::Error> {
        let query = format!(
            "INSERT INTO dogs (name, call_name, breed, gender, color, date_of_birth, \
                registration_number, microchip_number, status, is_breeding, dam_id, sire_id, \
                weight_lbs, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, 'active'), \
                COALESCE($10, false), $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dog>(&query)
            .bind(&input.name)
            .bind(&input.call_name)
            .bind(&input.breed)
            .bind(&input.gender)
            .bind(&input.color)
            .bind(input.date_of_birth)
            .bind(&input.registration_number)
            .bind(&input.microchip_number)
            .bind(&input.status)
            .bind(input.is_breeding)
            .bind(input.dam_id)
            .bind(input.sire_id)
            .bind(input.weight_lbs)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a dog by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Dog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dogs WHERE id = $1");
        sqlx::query_as::<_, Dog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the short summary of a dog, used for parent references.
    pub async fn find_summary(pool: &PgPool, id: DbId) -> Result<Option<DogSummary>, sqlx::Error> {
        sqlx::query_as::<_, DogSummary>(
            "SELECT id, name, call_name, gender FROM dogs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// List dogs matching the filters, ordered by name.
    pub async fn list(pool: &PgPool, params: &DogListParams) -> Result<Vec<Dog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM dogs
             WHERE ($1::TEXT IS NULL OR gender = $1)
               AND ($2::TEXT IS NULL OR status = $2)
               AND ($3::BOOL IS NULL OR is_breeding = $3)
               AND ($4::TEXT IS NULL OR name ILIKE $4 OR call_name ILIKE $4)
             ORDER BY name, id
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, Dog>(&query)
            .bind(&params.gender)
            .bind(&params.status)
            .bind(params.is_breeding)
            .bind(filter_pattern(params.q.as_deref()))
            .bind(list_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Update a dog. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDog,
    ) -> Result<Option<Dog>, sqlx::Error> {
        let query = format!(
            "UPDATE dogs SET
                name = COALESCE($2, name),
                call_name = COALESCE($3, call_name),
                breed = COALESCE($4, breed),
                gender = COALESCE($5, gender),
                color = COALESCE($6, color),
                date_of_birth = COALESCE($7, date_of_birth),
                registration_number = COALESCE($8, registration_number),
                microchip_number = COALESCE($9, microchip_number),
                status = COALESCE($10, status),
                is_breeding = COALESCE($11, is_breeding),
                dam_id = COALESCE($12, dam_id),
                sire_id = COALESCE($13, sire_id),
                weight_lbs = COALESCE($14, weight_lbs),
                notes = COALESCE($15, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dog>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.call_name)
            .bind(&input.breed)
            .bind(&input.gender)
            .bind(&input.color)
            .bind(input.date_of_birth)
            .bind(&input.registration_number)
            .bind(&input.microchip_number)
            .bind(&input.status)
            .bind(input.is_breeding)
            .bind(input.dam_id)
            .bind(input.sire_id)
            .bind(input.weight_lbs)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a dog by ID. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign-key violation while the dog is the dam of a litter.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM dogs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
