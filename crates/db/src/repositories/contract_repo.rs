//! Repository for the `contracts` table.

use kennel_core::contracts::{STATUS_CANCELLED, STATUS_DRAFT, STATUS_SENT, STATUS_SIGNED, TYPE_SALE};
use kennel_core::pagination::{clamp_offset, list_limit};
use kennel_core::puppies::STATUS_SOLD;
use kennel_core::types::DbId;
use sqlx::PgPool;

use crate::models::contract::{Contract, ContractListParams, CreateContract, UpdateContract};
use crate::models::puppy::Puppy;
use crate::repositories::puppy_repo::COLUMNS as PUPPY_COLUMNS;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, customer_id, puppy_id, title, contract_type, status, price_cents, \
    deposit_cents, terms, document_url, sent_at, signed_at, signed_by, created_at, updated_at";

/// Result of [`ContractRepo::sign`].
#[derive(Debug)]
pub enum SignOutcome {
    /// The contract is signed. `sold` is the puppy this signing sold, if any.
    Signed { contract: Contract, sold: Option<Puppy> },
    /// The contract was not in `sent` status.
    NotSent,
    /// The contract's puppy is already sold to a different customer.
    PuppyAlreadySold { puppy_id: DbId },
}

/// Provides CRUD operations and status transitions for contracts.
///
/// Transition methods only match rows in a permitted source status, so a
/// concurrent transition makes them return `None` instead of overwriting.
pub struct ContractRepo;

impl ContractRepo {
    /// Insert a draft contract. `contract_type` defaults to `sale`.
    pub async fn create(pool: &PgPool, input: &CreateContract) -> Result<Contract, sqlx::Error> {
        let query = format!(
            "INSERT INTO contracts (customer_id, puppy_id, title, contract_type, status, \
                price_cents, deposit_cents, terms)
             VALUES ($1, $2, $3, COALESCE($4, 'sale'), $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contract>(&query)
            .bind(input.customer_id)
            .bind(input.puppy_id)
            .bind(&input.title)
            .bind(&input.contract_type)
            .bind(STATUS_DRAFT)
            .bind(input.price_cents)
            .bind(input.deposit_cents)
            .bind(&input.terms)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Contract>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contracts WHERE id = $1");
        sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List contracts, newest first.
    pub async fn list(pool: &PgPool, params: &ContractListParams) -> Result<Vec<Contract>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contracts
             WHERE ($1::BIGINT IS NULL OR customer_id = $1)
               AND ($2::BIGINT IS NULL OR puppy_id = $2)
               AND ($3::TEXT IS NULL OR status = $3)
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Contract>(&query)
            .bind(params.customer_id)
            .bind(params.puppy_id)
            .bind(&params.status)
            .bind(list_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Edit a draft contract. Returns `None` if it is missing or no longer a draft.
    pub async fn update_draft(
        pool: &PgPool,
        id: DbId,
        input: &UpdateContract,
    ) -> Result<Option<Contract>, sqlx::Error> {
        let query = format!(
            "UPDATE contracts SET
                puppy_id = COALESCE($3, puppy_id),
                title = COALESCE($4, title),
                contract_type = COALESCE($5, contract_type),
                price_cents = COALESCE($6, price_cents),
                deposit_cents = COALESCE($7, deposit_cents),
                terms = COALESCE($8, terms)
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .bind(STATUS_DRAFT)
            .bind(input.puppy_id)
            .bind(&input.title)
            .bind(&input.contract_type)
            .bind(input.price_cents)
            .bind(input.deposit_cents)
            .bind(&input.terms)
            .fetch_optional(pool)
            .await
    }

    /// Attach an uploaded document.
    pub async fn set_document_url(
        pool: &PgPool,
        id: DbId,
        document_url: &str,
    ) -> Result<Option<Contract>, sqlx::Error> {
        let query =
            format!("UPDATE contracts SET document_url = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .bind(document_url)
            .fetch_optional(pool)
            .await
    }

    /// `draft -> sent`, stamping `sent_at`.
    pub async fn mark_sent(pool: &PgPool, id: DbId) -> Result<Option<Contract>, sqlx::Error> {
        let query = format!(
            "UPDATE contracts SET status = $2, sent_at = NOW()
             WHERE id = $1 AND status = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .bind(STATUS_SENT)
            .bind(STATUS_DRAFT)
            .fetch_optional(pool)
            .await
    }

    /// `draft|sent -> cancelled`.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<Option<Contract>, sqlx::Error> {
        let query = format!(
            "UPDATE contracts SET status = $2
             WHERE id = $1 AND status IN ($3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .bind(STATUS_CANCELLED)
            .bind(STATUS_DRAFT)
            .bind(STATUS_SENT)
            .fetch_optional(pool)
            .await
    }

    /// `sent -> signed`. A signed sale contract with a puppy marks that puppy
    /// sold to the contract's customer in the same transaction.
    ///
    /// Nothing is written when the contract is not `sent` or when the puppy
    /// is already sold to someone else. A puppy already sold to the same
    /// customer is left untouched and not reported as sold.
    pub async fn sign(pool: &PgPool, id: DbId, signed_by: &str) -> Result<SignOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE contracts SET status = $2, signed_at = NOW(), signed_by = $3
             WHERE id = $1 AND status = $4
             RETURNING {COLUMNS}"
        );
        let Some(contract) = sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .bind(STATUS_SIGNED)
            .bind(signed_by)
            .bind(STATUS_SENT)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(SignOutcome::NotSent);
        };

        let puppy_id = match contract.puppy_id {
            Some(puppy_id) if contract.contract_type == TYPE_SALE => puppy_id,
            _ => {
                tx.commit().await?;
                return Ok(SignOutcome::Signed { contract, sold: None });
            }
        };

        let current = sqlx::query_as::<_, (String, Option<DbId>)>(
            "SELECT status, customer_id FROM puppies WHERE id = $1 FOR UPDATE",
        )
        .bind(puppy_id)
        .fetch_optional(&mut *tx)
        .await?;

        let sold = match current {
            Some((status, owner)) if status == STATUS_SOLD => {
                if owner != Some(contract.customer_id) {
                    tracing::debug!(contract_id = id, puppy_id, "Puppy already sold to another customer");
                    return Ok(SignOutcome::PuppyAlreadySold { puppy_id });
                }
                None
            }
            Some(_) => {
                let query = format!(
                    "UPDATE puppies SET status = $2, customer_id = $3
                     WHERE id = $1
                     RETURNING {PUPPY_COLUMNS}"
                );
                sqlx::query_as::<_, Puppy>(&query)
                    .bind(puppy_id)
                    .bind(STATUS_SOLD)
                    .bind(contract.customer_id)
                    .fetch_optional(&mut *tx)
                    .await?
            }
            None => None,
        };

        tx.commit().await?;
        Ok(SignOutcome::Signed { contract, sold })
    }

    /// Delete a contract. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contracts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
