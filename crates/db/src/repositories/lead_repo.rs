//! Repository for the `leads` table.

use kennel_core::contacts::LEAD_STATUS_CONVERTED;
use kennel_core::pagination::{clamp_offset, list_limit};
use kennel_core::types::DbId;
use sqlx::PgPool;

use crate::models::customer::Customer;
use crate::models::lead::{CreateLead, Lead, LeadConversion, LeadListParams, UpdateLead};
use crate::repositories::customer_repo::COLUMNS as CUSTOMER_COLUMNS;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, first_name, last_name, email, phone, source, status, message, \
    customer_id, notes, created_at, updated_at";

/// Provides CRUD operations for leads and lead conversion.
pub struct LeadRepo;

impl LeadRepo {
    /// Insert a new lead. `status` defaults to `new`.
    pub async fn create(pool: &PgPool, input: &CreateLead) -> Result<Lead, sqlx::Error> {
        let query = format!(
            "INSERT INTO leads (first_name, last_name, email, phone, source, status, message, notes)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'new'), $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.source)
            .bind(&input.status)
            .bind(&input.message)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a lead by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads WHERE id = $1");
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List leads, newest first.
    pub async fn list(pool: &PgPool, params: &LeadListParams) -> Result<Vec<Lead>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM leads
             WHERE ($1::TEXT IS NULL OR status = $1)
               AND ($2::TEXT IS NULL OR source = $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(&params.status)
            .bind(&params.source)
            .bind(list_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Update a lead. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLead,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!(
            "UPDATE leads SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                source = COALESCE($6, source),
                status = COALESCE($7, status),
                message = COALESCE($8, message),
                notes = COALESCE($9, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.source)
            .bind(&input.status)
            .bind(&input.message)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a lead by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Convert a lead into a customer inside one transaction.
    ///
    /// Reuses an existing customer with the same email (case-insensitive),
    /// otherwise creates one from the lead's contact details. The lead row is
    /// locked for the duration, so two concurrent conversions cannot both
    /// succeed. Returns `None` if the lead does not exist or is already
    /// converted.
    pub async fn convert(pool: &PgPool, id: DbId) -> Result<Option<LeadConversion>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let lock_query = format!(
            "SELECT {COLUMNS} FROM leads WHERE id = $1 AND status <> $2 FOR UPDATE"
        );
        let Some(lead) = sqlx::query_as::<_, Lead>(&lock_query)
            .bind(id)
            .bind(LEAD_STATUS_CONVERTED)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let existing = match lead.email.as_deref() {
            Some(email) => {
                let query = format!(
                    "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE LOWER(email) = LOWER($1) LIMIT 1"
                );
                sqlx::query_as::<_, Customer>(&query)
                    .bind(email)
                    .fetch_optional(&mut *tx)
                    .await?
            }
            None => None,
        };

        let customer_created = existing.is_none();
        let customer = match existing {
            Some(customer) => customer,
            None => {
                let query = format!(
                    "INSERT INTO customers (first_name, last_name, email, phone, notes)
                     VALUES ($1, $2, $3, $4, $5)
                     RETURNING {CUSTOMER_COLUMNS}"
                );
                sqlx::query_as::<_, Customer>(&query)
                    .bind(&lead.first_name)
                    .bind(&lead.last_name)
                    .bind(&lead.email)
                    .bind(&lead.phone)
                    .bind(&lead.notes)
                    .fetch_one(&mut *tx)
                    .await?
            }
        };

        let update_query = format!(
            "UPDATE leads SET status = $2, customer_id = $3 WHERE id = $1 RETURNING {COLUMNS}"
        );
        let lead = sqlx::query_as::<_, Lead>(&update_query)
            .bind(id)
            .bind(LEAD_STATUS_CONVERTED)
            .bind(customer.id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(LeadConversion {
            lead,
            customer,
            customer_created,
        }))
    }
}
