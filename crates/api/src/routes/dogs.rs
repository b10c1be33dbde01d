//! Route definitions for the `/dogs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::dogs;
use crate::state::AppState;

/// Dog routes mounted at `/dogs`.
///
/// ```text
/// GET, POST          /                -> list, create
/// GET, PUT, DELETE   /{id}            -> get_by_id, update, delete
/// GET                /{id}/litters    -> litters
/// GET                /{id}/health     -> health
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dogs::list).post(dogs::create))
        .route(
            "/{id}",
            get(dogs::get_by_id).put(dogs::update).delete(dogs::delete),
        )
        .route("/{id}/litters", get(dogs::litters))
        .route("/{id}/health", get(dogs::health))
}
