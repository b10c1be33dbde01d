//! Route definitions for entity photos.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::photos;
use crate::state::AppState;

/// Photo routes mounted at `/photos`.
///
/// ```text
/// GET, POST          /               -> list, upload (multipart)
/// PUT                /reorder        -> reorder
/// GET, PUT, DELETE   /{id}           -> get_by_id, update, delete
/// POST               /{id}/cover     -> set_cover
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(photos::list).post(photos::upload))
        .route("/reorder", put(photos::reorder))
        .route(
            "/{id}",
            get(photos::get_by_id)
                .put(photos::update)
                .delete(photos::delete),
        )
        .route("/{id}/cover", post(photos::set_cover))
}
