//! Cross-entity search models.

use kennel_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Query-string parameters for `GET /search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    /// Comma-separated entity types; all types when omitted.
    pub types: Option<String>,
    pub limit: Option<i64>,
}

/// A single search hit.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SearchHit {
    pub entity_type: String,
    pub entity_id: DbId,
    pub title: String,
    pub subtitle: Option<String>,
}
