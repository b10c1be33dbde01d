//! Route definitions for the `/puppies` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::puppies;
use crate::state::AppState;

/// Puppy routes mounted at `/puppies`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(puppies::list).post(puppies::create))
        .route(
            "/{id}",
            get(puppies::get_by_id)
                .put(puppies::update)
                .delete(puppies::delete),
        )
}
