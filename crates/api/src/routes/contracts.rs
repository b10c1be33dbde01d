//! Route definitions for the `/contracts` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::contracts;
use crate::state::AppState;

/// Contract routes mounted at `/contracts`.
///
/// ```text
/// GET, POST          /                 -> list, create
/// GET, PUT, DELETE   /{id}             -> get_by_id, update, delete
/// POST               /{id}/document    -> upload_document (multipart)
/// POST               /{id}/send        -> send
/// POST               /{id}/sign        -> sign
/// POST               /{id}/cancel      -> cancel
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(contracts::list).post(contracts::create))
        .route(
            "/{id}",
            get(contracts::get_by_id)
                .put(contracts::update)
                .delete(contracts::delete),
        )
        .route("/{id}/document", post(contracts::upload_document))
        .route("/{id}/send", post(contracts::send))
        .route("/{id}/sign", post(contracts::sign))
        .route("/{id}/cancel", post(contracts::cancel))
}
