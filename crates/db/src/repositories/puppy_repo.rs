//! Repository for the `puppies` table.

use kennel_core::pagination::{clamp_offset, list_limit};
use kennel_core::types::DbId;
use sqlx::PgPool;

use crate::models::puppy::{CreatePuppy, Puppy, PuppyListParams, UpdatePuppy};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, litter_id, name, collar_color, gender, color, \
    birth_weight_oz, status, price_cents, customer_id, notes, created_at, updated_at";

/// Provides CRUD operations for puppies.
pub struct PuppyRepo;

impl PuppyRepo {
    /// Insert a new puppy. `status` defaults to `available`.
    pub async fn create(pool: &PgPool, input: &CreatePuppy) -> Result<Puppy, sqlx::Error> {
        let query = format!(
            "INSERT INTO puppies (litter_id, name, collar_color, gender, color, birth_weight_oz, \
                status, price_cents, customer_id, notes)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'available'), $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Puppy>(&query)
            .bind(input.litter_id)
            .bind(&input.name)
            .bind(&input.collar_color)
            .bind(&input.gender)
            .bind(&input.color)
            .bind(input.birth_weight_oz)
            .bind(&input.status)
            .bind(input.price_cents)
            .bind(input.customer_id)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a puppy by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Puppy>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM puppies WHERE id = $1");
        sqlx::query_as::<_, Puppy>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List puppies matching the filters, ordered by litter then id.
    pub async fn list(pool: &PgPool, params: &PuppyListParams) -> Result<Vec<Puppy>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM puppies
             WHERE ($1::BIGINT IS NULL OR litter_id = $1)
               AND ($2::TEXT IS NULL OR status = $2)
               AND ($3::BIGINT IS NULL OR customer_id = $3)
             ORDER BY litter_id DESC, id
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Puppy>(&query)
            .bind(params.litter_id)
            .bind(&params.status)
            .bind(params.customer_id)
            .bind(list_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// All puppies of a litter, unpaginated.
    pub async fn list_by_litter(pool: &PgPool, litter_id: DbId) -> Result<Vec<Puppy>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM puppies WHERE litter_id = $1 ORDER BY id");
        sqlx::query_as::<_, Puppy>(&query)
            .bind(litter_id)
            .fetch_all(pool)
            .await
    }

    /// Update a puppy. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePuppy,
    ) -> Result<Option<Puppy>, sqlx::Error> {
        let query = format!(
            "UPDATE puppies SET
                name = COALESCE($2, name),
                collar_color = COALESCE($3, collar_color),
                gender = COALESCE($4, gender),
                color = COALESCE($5, color),
                birth_weight_oz = COALESCE($6, birth_weight_oz),
                status = COALESCE($7, status),
                price_cents = COALESCE($8, price_cents),
                customer_id = COALESCE($9, customer_id),
                notes = COALESCE($10, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Puppy>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.collar_color)
            .bind(&input.gender)
            .bind(&input.color)
            .bind(input.birth_weight_oz)
            .bind(&input.status)
            .bind(input.price_cents)
            .bind(input.customer_id)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a puppy by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM puppies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
