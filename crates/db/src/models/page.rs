//! CMS page model and DTOs.

use kennel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `pages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Page {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub meta_description: Option<String>,
    pub template: Option<String>,
    pub is_published: bool,
    pub published_at: Option<Timestamp>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePage {
    pub title: String,
    /// Derived from the title when omitted.
    pub slug: Option<String>,
    pub content: Option<String>,
    pub meta_description: Option<String>,
    pub template: Option<String>,
    pub is_published: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePage {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub meta_description: Option<String>,
    pub template: Option<String>,
    pub is_published: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageListParams {
    pub is_published: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
