//! Route definitions for the `/customers` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::customers;
use crate::state::AppState;

/// Customer routes mounted at `/customers`.
///
/// ```text
/// GET, POST          /                   -> list, create
/// GET, PUT, DELETE   /{id}               -> get_by_id, update, delete
/// GET                /{id}/puppies       -> puppies
/// GET                /{id}/contracts     -> contracts
/// GET                /{id}/messages      -> messages
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(customers::list).post(customers::create))
        .route(
            "/{id}",
            get(customers::get_by_id)
                .put(customers::update)
                .delete(customers::delete),
        )
        .route("/{id}/puppies", get(customers::puppies))
        .route("/{id}/contracts", get(customers::contracts))
        .route("/{id}/messages", get(customers::messages))
}
