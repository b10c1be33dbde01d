//! Repository for the `customers` table.

use kennel_core::pagination::{clamp_offset, list_limit};
use kennel_core::search::filter_pattern;
use kennel_core::types::DbId;
use sqlx::PgPool;

use crate::models::customer::{CreateCustomer, Customer, CustomerListParams, UpdateCustomer};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, first_name, last_name, email, phone, address, city, \
    state, postal_code, notes, created_at, updated_at";

/// Provides CRUD operations for customers.
pub struct CustomerRepo;

impl CustomerRepo {
    /// Insert a new customer. A duplicate email violates `uq_customers_email`.
    pub async fn create(pool: &PgPool, input: &CreateCustomer) -> Result<Customer, sqlx::Error> {
        let query = format!(
            "INSERT INTO customers (first_name, last_name, email, phone, address, city, state, \
                postal_code, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.postal_code)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a customer by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE id = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List customers, optionally filtered by a name/email substring.
    pub async fn list(
        pool: &PgPool,
        params: &CustomerListParams,
    ) -> Result<Vec<Customer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM customers
             WHERE ($1::TEXT IS NULL
                    OR first_name ILIKE $1 OR last_name ILIKE $1 OR email ILIKE $1)
             ORDER BY last_name NULLS LAST, first_name, id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(filter_pattern(params.q.as_deref()))
            .bind(list_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Update a customer. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCustomer,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!(
            "UPDATE customers SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                address = COALESCE($6, address),
                city = COALESCE($7, city),
                state = COALESCE($8, state),
                postal_code = COALESCE($9, postal_code),
                notes = COALESCE($10, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.postal_code)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a customer by ID.
    ///
    /// Fails with a foreign-key violation while a contract references the customer.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
