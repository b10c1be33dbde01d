//! Repository for the `event_rules` table.

use kennel_core::types::DbId;
use sqlx::PgPool;

use crate::models::event::{CreateEventRule, EventRule, EventRuleListParams, UpdateEventRule};

const COLUMNS: &str = "id, name, trigger_type, conditions, action_type, action_config, \
    is_active, created_at, updated_at";

/// Provides CRUD operations for event rules.
pub struct EventRuleRepo;

impl EventRuleRepo {
    pub async fn create(pool: &PgPool, input: &CreateEventRule) -> Result<EventRule, sqlx::Error> {
        let query = format!(
            "INSERT INTO event_rules (name, trigger_type, conditions, action_type, action_config, \
                is_active)
             VALUES ($1, $2, COALESCE($3, '{{}}'::jsonb), $4, COALESCE($5, '{{}}'::jsonb), \
                COALESCE($6, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EventRule>(&query)
            .bind(&input.name)
            .bind(&input.trigger_type)
            .bind(&input.conditions)
            .bind(&input.action_type)
            .bind(&input.action_config)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<EventRule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM event_rules WHERE id = $1");
        sqlx::query_as::<_, EventRule>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        params: &EventRuleListParams,
    ) -> Result<Vec<EventRule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM event_rules
             WHERE ($1::TEXT IS NULL OR trigger_type = $1)
               AND ($2::BOOL IS NULL OR is_active = $2)
             ORDER BY name, id"
        );
        sqlx::query_as::<_, EventRule>(&query)
            .bind(&params.trigger_type)
            .bind(params.is_active)
            .fetch_all(pool)
            .await
    }

    /// Active rules for a trigger, in creation order.
    pub async fn list_active_for_trigger(
        pool: &PgPool,
        trigger_type: &str,
    ) -> Result<Vec<EventRule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM event_rules
             WHERE trigger_type = $1 AND is_active
             ORDER BY id"
        );
        sqlx::query_as::<_, EventRule>(&query)
            .bind(trigger_type)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEventRule,
    ) -> Result<Option<EventRule>, sqlx::Error> {
        let query = format!(
            "UPDATE event_rules SET
                name = COALESCE($2, name),
                trigger_type = COALESCE($3, trigger_type),
                conditions = COALESCE($4, conditions),
                action_type = COALESCE($5, action_type),
                action_config = COALESCE($6, action_config),
                is_active = COALESCE($7, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EventRule>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.trigger_type)
            .bind(&input.conditions)
            .bind(&input.action_type)
            .bind(&input.action_config)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM event_rules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
