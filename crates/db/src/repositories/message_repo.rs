//! Repository for the `messages` table.

use kennel_core::pagination::{clamp_offset, list_limit};
use kennel_core::types::DbId;
use sqlx::PgPool;

use crate::models::message::{
    Conversation, ConversationRow, CreateMessage, Message, MessageListParams,
};

const COLUMNS: &str = "id, customer_id, lead_id, direction, subject, body, sender_name, \
    sender_email, media_urls, is_read, created_at, updated_at";

/// Provides storage for customer and lead messages.
pub struct MessageRepo;

impl MessageRepo {
    /// Record a message. Outbound messages are stored as already read.
    pub async fn create(pool: &PgPool, input: &CreateMessage) -> Result<Message, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages (customer_id, lead_id, direction, subject, body, sender_name, \
                sender_email, media_urls, is_read)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, '[]'::jsonb), $3 = 'outbound')
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(input.customer_id)
            .bind(input.lead_id)
            .bind(&input.direction)
            .bind(&input.subject)
            .bind(&input.body)
            .bind(&input.sender_name)
            .bind(&input.sender_email)
            .bind(&input.media_urls)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Message>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM messages WHERE id = $1");
        sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List messages, newest first.
    pub async fn list(pool: &PgPool, params: &MessageListParams) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages
             WHERE ($1::BIGINT IS NULL OR customer_id = $1)
               AND ($2::BIGINT IS NULL OR lead_id = $2)
               AND ($3::BOOL IS NULL OR $3 = false OR NOT is_read)
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(params.customer_id)
            .bind(params.lead_id)
            .bind(params.unread)
            .bind(list_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Mark a message read or unread.
    pub async fn set_read(pool: &PgPool, id: DbId, is_read: bool) -> Result<Option<Message>, sqlx::Error> {
        let query = format!("UPDATE messages SET is_read = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .bind(is_read)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// One summary per customer or lead with messages, most recent activity first.
    pub async fn conversations(pool: &PgPool) -> Result<Vec<Conversation>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ConversationRow>(
            "SELECT m.customer_id, m.lead_id,
                    COALESCE(
                        NULLIF(CONCAT_WS(' ', c.first_name, c.last_name), ''),
                        NULLIF(CONCAT_WS(' ', l.first_name, l.last_name), '')
                    ) AS display_name,
                    MAX(m.created_at) AS last_message_at,
                    (ARRAY_AGG(m.body ORDER BY m.created_at DESC, m.id DESC))[1] AS last_body,
                    COUNT(*) AS message_count,
                    COUNT(*) FILTER (WHERE NOT m.is_read) AS unread_count
             FROM messages m
             LEFT JOIN customers c ON c.id = m.customer_id
             LEFT JOIN leads l ON l.id = m.lead_id
             GROUP BY m.customer_id, m.lead_id, c.first_name, c.last_name, l.first_name, l.last_name
             ORDER BY last_message_at DESC",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(Conversation::from).collect())
    }
}
