//! Route definitions for the `/leads` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::leads;
use crate::state::AppState;

/// Lead routes mounted at `/leads`.
///
/// ```text
/// GET, POST          /               -> list, create
/// GET, PUT, DELETE   /{id}           -> get_by_id, update, delete
/// POST               /{id}/convert   -> convert
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(leads::list).post(leads::create))
        .route(
            "/{id}",
            get(leads::get_by_id).put(leads::update).delete(leads::delete),
        )
        .route("/{id}/convert", post(leads::convert))
}
