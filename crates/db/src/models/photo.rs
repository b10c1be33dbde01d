//! Photo entity model and DTOs.

use kennel_core::photos::PhotoSlot;
use kennel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `photos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Photo {
    pub id: DbId,
    pub entity_type: String,
    pub entity_id: DbId,
    pub url: String,
    pub file_name: String,
    pub caption: Option<String>,
    pub is_cover: bool,
    pub sort_order: i32,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub content_type: Option<String>,
    pub size_bytes: Option<i64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Photo {
    pub fn slot(&self) -> PhotoSlot {
        PhotoSlot {
            id: self.id,
            is_cover: self.is_cover,
            sort_order: self.sort_order,
        }
    }
}

/// Insert payload assembled by the upload handler once the file is stored.
#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub entity_type: String,
    pub entity_id: DbId,
    pub url: String,
    pub file_name: String,
    pub caption: Option<String>,
    /// `None` lets the repository decide (first photo becomes cover).
    pub is_cover: Option<bool>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub content_type: Option<String>,
    pub size_bytes: Option<i64>,
}

/// DTO for updating a photo's metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePhoto {
    pub caption: Option<String>,
    pub sort_order: Option<i32>,
}

/// Query-string filters for listing photos of an entity.
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoListParams {
    pub entity_type: String,
    pub entity_id: DbId,
}

/// Request body for `PUT /photos/reorder`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderPhotos {
    pub entity_type: String,
    pub entity_id: DbId,
    pub photo_ids: Vec<DbId>,
}
