//! Repository for the `litters` table.

use kennel_core::pagination::{clamp_offset, list_limit};
use kennel_core::types::DbId;
use sqlx::PgPool;

use crate::models::litter::{CreateLitter, Litter, LitterListParams, LitterWithParents, UpdateLitter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, dam_id, sire_id, breeding_date, expected_whelp_date, \
    whelp_date, status, puppy_count, price_cents, notes, created_at, updated_at";

/// Litter columns qualified with the `l` alias plus the joined parent names.
const JOINED_COLUMNS: &str = "l.id, l.name, l.dam_id, l.sire_id, l.breeding_date, \
    l.expected_whelp_date, l.whelp_date, l.status, l.puppy_count, l.price_cents, l.notes, \
    l.created_at, l.updated_at, d.name AS dam_name, s.name AS sire_name";

/// FROM clause joining both parents in one pass.
const JOINED_FROM: &str =
    "litters l LEFT JOIN dogs d ON d.id = l.dam_id LEFT JOIN dogs s ON s.id = l.sire_id";

/// Provides CRUD operations for litters.
pub struct LitterRepo;

impl LitterRepo {
    /// Insert a new litter. `status` defaults to `planned`.
    ///
    /// The caller resolves `expected_whelp_date` before inserting.
    pub async fn create(pool: &PgPool, input: &CreateLitter) -> Result<Litter, sqlx::Error> {
        let query = format!(
            "INSERT INTO litters (name, dam_id, sire_id, breeding_date, expected_whelp_date, \
                whelp_date, status, puppy_count, price_cents, notes)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'planned'), $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Litter>(&query)
            .bind(&input.name)
            .bind(input.dam_id)
            .bind(input.sire_id)
            .bind(input.breeding_date)
            .bind(input.expected_whelp_date)
            .bind(input.whelp_date)
            .bind(&input.status)
            .bind(input.puppy_count)
            .bind(input.price_cents)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a litter by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Litter>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM litters WHERE id = $1");
        sqlx::query_as::<_, Litter>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a litter by ID together with its parents' names.
    pub async fn find_with_parents(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<LitterWithParents>, sqlx::Error> {
        let query = format!("SELECT {JOINED_COLUMNS} FROM {JOINED_FROM} WHERE l.id = $1");
        sqlx::query_as::<_, LitterWithParents>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List litters with parent names, newest breeding first.
    pub async fn list(
        pool: &PgPool,
        params: &LitterListParams,
    ) -> Result<Vec<LitterWithParents>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM {JOINED_FROM}
             WHERE ($1::TEXT IS NULL OR l.status = $1)
               AND ($2::BIGINT IS NULL OR l.dam_id = $2)
               AND ($3::BIGINT IS NULL OR l.sire_id = $3)
             ORDER BY COALESCE(l.whelp_date, l.breeding_date) DESC NULLS LAST, l.id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, LitterWithParents>(&query)
            .bind(&params.status)
            .bind(params.dam_id)
            .bind(params.sire_id)
            .bind(list_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// List every litter a dog parented, as dam or sire.
    pub async fn list_for_dog(
        pool: &PgPool,
        dog_id: DbId,
    ) -> Result<Vec<LitterWithParents>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM {JOINED_FROM}
             WHERE l.dam_id = $1 OR l.sire_id = $1
             ORDER BY COALESCE(l.whelp_date, l.breeding_date) DESC NULLS LAST, l.id DESC"
        );
        sqlx::query_as::<_, LitterWithParents>(&query)
            .bind(dog_id)
            .fetch_all(pool)
            .await
    }

    /// Update a litter. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLitter,
    ) -> Result<Option<Litter>, sqlx::Error> {
        let query = format!(
            "UPDATE litters SET
                name = COALESCE($2, name),
                dam_id = COALESCE($3, dam_id),
                sire_id = COALESCE($4, sire_id),
                breeding_date = COALESCE($5, breeding_date),
                expected_whelp_date = COALESCE($6, expected_whelp_date),
                whelp_date = COALESCE($7, whelp_date),
                status = COALESCE($8, status),
                puppy_count = COALESCE($9, puppy_count),
                price_cents = COALESCE($10, price_cents),
                notes = COALESCE($11, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Litter>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.dam_id)
            .bind(input.sire_id)
            .bind(input.breeding_date)
            .bind(input.expected_whelp_date)
            .bind(input.whelp_date)
            .bind(&input.status)
            .bind(input.puppy_count)
            .bind(input.price_cents)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a litter by ID. Puppies and litter events cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM litters WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
