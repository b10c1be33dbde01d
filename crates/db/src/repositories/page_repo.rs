//! Repository for the `pages` table.

use kennel_core::pagination::{clamp_offset, list_limit};
use kennel_core::types::DbId;
use sqlx::PgPool;

use crate::models::page::{CreatePage, Page, PageListParams, UpdatePage};

const COLUMNS: &str = "id, title, slug, content, meta_description, template, is_published, \
    published_at, sort_order, created_at, updated_at";

/// Provides CRUD operations for CMS pages.
pub struct PageRepo;

impl PageRepo {
    /// Insert a page with a resolved slug. A duplicate slug violates `uq_pages_slug`.
    pub async fn create(pool: &PgPool, input: &CreatePage, slug: &str) -> Result<Page, sqlx::Error> {
        let query = format!(
            "INSERT INTO pages (title, slug, content, meta_description, template, is_published, \
                published_at, sort_order)
             VALUES ($1, $2, COALESCE($3, ''), $4, $5, COALESCE($6, false),
                CASE WHEN COALESCE($6, false) THEN NOW() END, COALESCE($7, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.content)
            .bind(&input.meta_description)
            .bind(&input.template)
            .bind(input.is_published)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE id = $1");
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a published page by slug. Drafts are invisible here.
    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE slug = $1 AND is_published");
        sqlx::query_as::<_, Page>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool, params: &PageListParams) -> Result<Vec<Page>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pages
             WHERE ($1::BOOL IS NULL OR is_published = $1)
             ORDER BY sort_order, title, id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(params.is_published)
            .bind(list_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Update a page. `published_at` is set the first time it is published
    /// and kept afterwards.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePage,
    ) -> Result<Option<Page>, sqlx::Error> {
        let query = format!(
            "UPDATE pages SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                content = COALESCE($4, content),
                meta_description = COALESCE($5, meta_description),
                template = COALESCE($6, template),
                is_published = COALESCE($7, is_published),
                published_at = CASE
                    WHEN COALESCE($7, is_published) AND published_at IS NULL THEN NOW()
                    ELSE published_at
                END,
                sort_order = COALESCE($8, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.content)
            .bind(&input.meta_description)
            .bind(&input.template)
            .bind(input.is_published)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
