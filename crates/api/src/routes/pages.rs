//! Route definitions for CMS pages.

use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// Page routes mounted at `/pages`.
///
/// ```text
/// GET, POST          /              -> list, create
/// GET                /slug/{slug}   -> get_by_slug (public)
/// GET, PUT, DELETE   /{id}          -> get_by_id, update, delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::list).post(pages::create))
        .route("/slug/{slug}", get(pages::get_by_slug))
        .route(
            "/{id}",
            get(pages::get_by_id).put(pages::update).delete(pages::delete),
        )
}
