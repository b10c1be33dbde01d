//! Repository for the `photos` table.
//!
//! Every write that can change which photo is an entity's cover runs in a
//! transaction holding a per-entity advisory lock, so the partial unique
//! index `uq_photos_cover` is never raced.

use kennel_core::photos::{self, PhotoSlot};
use kennel_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::photo::{NewPhoto, Photo, UpdatePhoto};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, entity_type, entity_id, url, file_name, caption, is_cover, \
    sort_order, width, height, content_type, size_bytes, created_at, updated_at";

/// Display order: cover first, then sort order, then upload order.
const ORDER: &str = "is_cover DESC, sort_order, id";

/// Provides CRUD and cover management for photos.
pub struct PhotoRepo;

impl PhotoRepo {
    /// Whether the entity a photo would attach to exists.
    pub async fn entity_exists(
        pool: &PgPool,
        entity_type: &str,
        entity_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let table = match entity_type {
            photos::ENTITY_DOG => "dogs",
            photos::ENTITY_LITTER => "litters",
            photos::ENTITY_PUPPY => "puppies",
            _ => return Ok(false),
        };
        let query = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = $1)");
        sqlx::query_scalar::<_, bool>(&query)
            .bind(entity_id)
            .fetch_one(pool)
            .await
    }

    /// Photos of one entity in display order.
    pub async fn list_for_entity(
        pool: &PgPool,
        entity_type: &str,
        entity_id: DbId,
    ) -> Result<Vec<Photo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM photos WHERE entity_type = $1 AND entity_id = $2 ORDER BY {ORDER}"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(entity_type)
            .bind(entity_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Photo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM photos WHERE id = $1");
        sqlx::query_as::<_, Photo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a photo at the end of the entity's gallery.
    ///
    /// The first photo of an entity becomes its cover. When the new photo is
    /// the cover, the flag is cleared on every other photo of the entity in
    /// the same transaction.
    pub async fn create(pool: &PgPool, input: &NewPhoto) -> Result<Photo, sqlx::Error> {
        let mut tx = pool.begin().await?;
        lock_entity(&mut tx, &input.entity_type, input.entity_id).await?;

        let (count, max_sort) = sqlx::query_as::<_, (i64, Option<i32>)>(
            "SELECT COUNT(*), MAX(sort_order) FROM photos WHERE entity_type = $1 AND entity_id = $2",
        )
        .bind(&input.entity_type)
        .bind(input.entity_id)
        .fetch_one(&mut *tx)
        .await?;

        let is_cover = photos::new_photo_is_cover(count, input.is_cover);
        if is_cover {
            clear_cover(&mut tx, &input.entity_type, input.entity_id).await?;
        }

        let query = format!(
            "INSERT INTO photos (entity_type, entity_id, url, file_name, caption, is_cover, \
                sort_order, width, height, content_type, size_bytes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        let photo = sqlx::query_as::<_, Photo>(&query)
            .bind(&input.entity_type)
            .bind(input.entity_id)
            .bind(&input.url)
            .bind(&input.file_name)
            .bind(&input.caption)
            .bind(is_cover)
            .bind(photos::next_sort_order(max_sort))
            .bind(input.width)
            .bind(input.height)
            .bind(&input.content_type)
            .bind(input.size_bytes)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(photo)
    }

    /// Update caption and sort order. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePhoto,
    ) -> Result<Option<Photo>, sqlx::Error> {
        let query = format!(
            "UPDATE photos SET
                caption = COALESCE($2, caption),
                sort_order = COALESCE($3, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(id)
            .bind(&input.caption)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Make a photo its entity's cover, clearing the previous cover atomically.
    ///
    /// Returns `None` if the photo does not exist.
    pub async fn set_cover(pool: &PgPool, id: DbId) -> Result<Option<Photo>, sqlx::Error> {
        let Some(target) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let mut tx = pool.begin().await?;
        lock_entity(&mut tx, &target.entity_type, target.entity_id).await?;
        clear_cover(&mut tx, &target.entity_type, target.entity_id).await?;

        let query =
            format!("UPDATE photos SET is_cover = true WHERE id = $1 RETURNING {COLUMNS}");
        let photo = sqlx::query_as::<_, Photo>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(photo)
    }

    /// Delete a photo. If it was the cover, the remaining photo with the
    /// lowest sort order is promoted.
    ///
    /// Returns the deleted row, or `None` if it did not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Photo>, sqlx::Error> {
        let Some(target) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let mut tx = pool.begin().await?;
        lock_entity(&mut tx, &target.entity_type, target.entity_id).await?;

        let slots = sqlx::query_as::<_, (DbId, bool, i32)>(
            "SELECT id, is_cover, sort_order FROM photos WHERE entity_type = $1 AND entity_id = $2",
        )
        .bind(&target.entity_type)
        .bind(target.entity_id)
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .map(|(id, is_cover, sort_order)| PhotoSlot {
            id,
            is_cover,
            sort_order,
        })
        .collect::<Vec<_>>();

        let query = format!("DELETE FROM photos WHERE id = $1 RETURNING {COLUMNS}");
        let Some(deleted) = sqlx::query_as::<_, Photo>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if let Some(successor) = photos::cover_after_removal(&slots, id) {
            sqlx::query("UPDATE photos SET is_cover = true WHERE id = $1")
                .bind(successor)
                .execute(&mut *tx)
                .await?;
            tracing::debug!(photo_id = successor, "Cover photo promoted");
        }

        tx.commit().await?;
        Ok(Some(deleted))
    }

    /// Delete every photo row of an entity, returning the removed rows so
    /// their stored files can be cleaned up.
    pub async fn delete_for_entity(
        pool: &PgPool,
        entity_type: &str,
        entity_id: DbId,
    ) -> Result<Vec<Photo>, sqlx::Error> {
        let query = format!(
            "DELETE FROM photos WHERE entity_type = $1 AND entity_id = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(entity_type)
            .bind(entity_id)
            .fetch_all(pool)
            .await
    }

    /// Rewrite sort orders so `photo_ids[i]` gets sort order `i`.
    ///
    /// The caller validates that `photo_ids` is a permutation of the entity's photos.
    pub async fn reorder(
        pool: &PgPool,
        entity_type: &str,
        entity_id: DbId,
        photo_ids: &[DbId],
    ) -> Result<Vec<Photo>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        lock_entity(&mut tx, entity_type, entity_id).await?;

        for (position, photo_id) in photo_ids.iter().enumerate() {
            sqlx::query(
                "UPDATE photos SET sort_order = $4
                 WHERE id = $1 AND entity_type = $2 AND entity_id = $3",
            )
            .bind(photo_id)
            .bind(entity_type)
            .bind(entity_id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Self::list_for_entity(pool, entity_type, entity_id).await
    }
}

/// Serialize cover changes per entity for the rest of the transaction.
async fn lock_entity(
    tx: &mut Transaction<'_, Postgres>,
    entity_type: &str,
    entity_id: DbId,
) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1 || ':' || $2::TEXT, 0))")
        .bind(entity_type)
        .bind(entity_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

async fn clear_cover(
    tx: &mut Transaction<'_, Postgres>,
    entity_type: &str,
    entity_id: DbId,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE photos SET is_cover = false
         WHERE entity_type = $1 AND entity_id = $2 AND is_cover",
    )
    .bind(entity_type)
    .bind(entity_id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
