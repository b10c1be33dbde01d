//! Repository for the `events` table.

use kennel_core::calendar::PlannedEvent;
use kennel_core::pagination::{clamp_offset, list_limit};
use kennel_core::types::{Date, DbId};
use sqlx::PgPool;

use crate::models::event::{CreateEvent, Event, EventListParams, UpdateEvent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, event_type, event_date, end_date, all_day, \
    litter_id, dog_id, puppy_id, rule_id, is_completed, created_at, updated_at";

/// What a batch of generated events is attached to.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventSubject {
    pub litter_id: Option<DbId>,
    pub dog_id: Option<DbId>,
    pub puppy_id: Option<DbId>,
}

/// Provides CRUD operations for calendar events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a single event. `event_type` defaults to `custom`, `all_day` to `true`.
    pub async fn create(pool: &PgPool, input: &CreateEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (title, description, event_type, event_date, end_date, all_day, \
                litter_id, dog_id, puppy_id, rule_id)
             VALUES ($1, $2, COALESCE($3, 'custom'), $4, $5, COALESCE($6, true), $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.event_type)
            .bind(input.event_date)
            .bind(input.end_date)
            .bind(input.all_day)
            .bind(input.litter_id)
            .bind(input.dog_id)
            .bind(input.puppy_id)
            .bind(input.rule_id)
            .fetch_one(pool)
            .await
    }

    /// Insert a batch of planned events for one subject in a single transaction.
    pub async fn create_planned(
        pool: &PgPool,
        planned: &[PlannedEvent],
        subject: EventSubject,
        rule_id: Option<DbId>,
    ) -> Result<Vec<Event>, sqlx::Error> {
        if planned.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            "INSERT INTO events (title, description, event_type, event_date, litter_id, dog_id, \
                puppy_id, rule_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );

        let mut tx = pool.begin().await?;
        let mut created = Vec::with_capacity(planned.len());
        for event in planned {
            let row = sqlx::query_as::<_, Event>(&query)
                .bind(&event.title)
                .bind(&event.description)
                .bind(&event.event_type)
                .bind(event.event_date)
                .bind(subject.litter_id)
                .bind(subject.dog_id)
                .bind(subject.puppy_id)
                .bind(rule_id)
                .fetch_one(&mut *tx)
                .await?;
            created.push(row);
        }
        tx.commit().await?;

        Ok(created)
    }

    /// `(title, event_date)` of every event already attached to a subject.
    pub async fn existing_keys(
        pool: &PgPool,
        subject: EventSubject,
    ) -> Result<Vec<(String, Date)>, sqlx::Error> {
        sqlx::query_as::<_, (String, Date)>(
            "SELECT title, event_date FROM events
             WHERE litter_id IS NOT DISTINCT FROM $1
               AND dog_id IS NOT DISTINCT FROM $2
               AND puppy_id IS NOT DISTINCT FROM $3",
        )
        .bind(subject.litter_id)
        .bind(subject.dog_id)
        .bind(subject.puppy_id)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List events in date order. `start`/`end` bound `event_date` inclusively.
    pub async fn list(pool: &PgPool, params: &EventListParams) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE ($1::DATE IS NULL OR event_date >= $1)
               AND ($2::DATE IS NULL OR event_date <= $2)
               AND ($3::TEXT IS NULL OR event_type = $3)
               AND ($4::BIGINT IS NULL OR litter_id = $4)
               AND ($5::BIGINT IS NULL OR dog_id = $5)
             ORDER BY event_date, id
             LIMIT $6 OFFSET $7"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(params.start)
            .bind(params.end)
            .bind(&params.event_type)
            .bind(params.litter_id)
            .bind(params.dog_id)
            .bind(list_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                event_type = COALESCE($4, event_type),
                event_date = COALESCE($5, event_date),
                end_date = COALESCE($6, end_date),
                all_day = COALESCE($7, all_day),
                is_completed = COALESCE($8, is_completed)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.event_type)
            .bind(input.event_date)
            .bind(input.end_date)
            .bind(input.all_day)
            .bind(input.is_completed)
            .fetch_optional(pool)
            .await
    }

    /// Flip an event's completion flag.
    pub async fn toggle_completed(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET is_completed = NOT is_completed WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
