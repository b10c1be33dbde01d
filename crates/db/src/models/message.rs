//! Message entity model and DTOs.

use kennel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub customer_id: Option<DbId>,
    pub lead_id: Option<DbId>,
    pub direction: String,
    pub subject: Option<String>,
    pub body: String,
    pub sender_name: Option<String>,
    pub sender_email: Option<String>,
    pub media_urls: serde_json::Value,
    pub is_read: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a message.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMessage {
    pub customer_id: Option<DbId>,
    pub lead_id: Option<DbId>,
    pub direction: String,
    pub subject: Option<String>,
    pub body: String,
    pub sender_name: Option<String>,
    pub sender_email: Option<String>,
    /// Array of URL strings; defaults to `[]`.
    pub media_urls: Option<serde_json::Value>,
}

/// Query-string filters for listing messages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageListParams {
    pub customer_id: Option<DbId>,
    pub lead_id: Option<DbId>,
    /// When `true`, only unread messages.
    pub unread: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Aggregate row: one per customer or lead that has messages.
#[derive(Debug, Clone, FromRow)]
pub struct ConversationRow {
    pub customer_id: Option<DbId>,
    pub lead_id: Option<DbId>,
    pub display_name: Option<String>,
    pub last_message_at: Timestamp,
    pub last_body: String,
    pub message_count: i64,
    pub unread_count: i64,
}

/// A conversation summary as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
    pub customer_id: Option<DbId>,
    pub lead_id: Option<DbId>,
    pub display_name: Option<String>,
    pub last_message_at: Timestamp,
    pub preview: String,
    pub message_count: i64,
    pub unread_count: i64,
}

impl From<ConversationRow> for Conversation {
    fn from(row: ConversationRow) -> Self {
        Self {
            customer_id: row.customer_id,
            lead_id: row.lead_id,
            display_name: row.display_name,
            last_message_at: row.last_message_at,
            preview: kennel_core::messages::preview(&row.last_body),
            message_count: row.message_count,
            unread_count: row.unread_count,
        }
    }
}
