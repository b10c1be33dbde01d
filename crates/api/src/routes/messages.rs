//! Route definitions for customer and lead messages.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::messages;
use crate::state::AppState;

/// Message routes mounted at `/messages`.
///
/// ```text
/// GET, POST    /                -> list, create
/// GET          /conversations   -> conversations
/// GET, DELETE  /{id}            -> get_by_id, delete
/// POST         /{id}/read       -> mark_read
/// POST         /{id}/unread     -> mark_unread
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(messages::list).post(messages::create))
        .route("/conversations", get(messages::conversations))
        .route(
            "/{id}",
            get(messages::get_by_id).delete(messages::delete),
        )
        .route("/{id}/read", post(messages::mark_read))
        .route("/{id}/unread", post(messages::mark_unread))
}
