//! Handlers for customer and lead messages (`/messages`).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kennel_core::messages;
use kennel_core::types::DbId;
use kennel_core::validate;
use kennel_db::models::message::{CreateMessage, MessageListParams};
use kennel_db::repositories::MessageRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/messages
///
/// Filters: `customer_id`, `lead_id`, `unread=true`. Newest first.
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<MessageListParams>,
) -> AppResult<impl IntoResponse> {
    let items = MessageRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/messages/conversations
///
/// One row per customer or lead: last message time, preview and unread count.
pub async fn conversations(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let items = MessageRepo::conversations(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/messages/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let message = MessageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Message", id))?;
    Ok(Json(DataResponse { data: message }))
}

/// POST /api/messages
///
/// Outbound messages are stored as already read.
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateMessage>,
) -> AppResult<impl IntoResponse> {
    validate::exactly_one("customer_id", input.customer_id, "lead_id", input.lead_id)?;
    messages::validate_direction(&input.direction)?;
    validate::non_empty("body", &input.body)?;
    if let Some(media_urls) = &input.media_urls {
        messages::validate_media_urls(media_urls)?;
    }

    let message = MessageRepo::create(&state.pool, &input).await?;

    tracing::info!(
        message_id = message.id,
        customer_id = ?message.customer_id,
        lead_id = ?message.lead_id,
        direction = %message.direction,
        "Message stored"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}

/// POST /api/messages/{id}/read
pub async fn mark_read(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    set_read(&state, id, true).await
}

/// POST /api/messages/{id}/unread
pub async fn mark_unread(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    set_read(&state, id, false).await
}

async fn set_read(state: &AppState, id: DbId, is_read: bool) -> AppResult<impl IntoResponse> {
    let message = MessageRepo::set_read(&state.pool, id, is_read)
        .await?
        .ok_or(AppError::not_found("Message", id))?;
    Ok(Json(DataResponse { data: message }))
}

/// DELETE /api/messages/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if MessageRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Message", id))
    }
}
