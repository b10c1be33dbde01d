//! Route definitions for the `/litters` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::litters;
use crate::state::AppState;

/// Litter routes mounted at `/litters`.
///
/// ```text
/// GET, POST          /                        -> list, create
/// GET, PUT, DELETE   /{id}                    -> get_by_id, update, delete
/// GET                /{id}/puppies            -> puppies
/// POST               /{id}/events/generate    -> generate_events
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(litters::list).post(litters::create))
        .route(
            "/{id}",
            get(litters::get_by_id)
                .put(litters::update)
                .delete(litters::delete),
        )
        .route("/{id}/puppies", get(litters::puppies))
        .route("/{id}/events/generate", post(litters::generate_events))
}
