//! Route definitions for calendar events and event rules.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

/// Event routes mounted at `/events`.
///
/// ```text
/// GET, POST          /                     -> list, create
/// GET, PUT, DELETE   /{id}                 -> get_by_id, update, delete
/// POST               /{id}/complete        -> toggle_complete
/// GET, POST          /rules                -> list_rules, create_rule
/// POST               /rules/run            -> run_rules
/// GET, PUT, DELETE   /rules/{id}           -> get_rule, update_rule, delete_rule
/// POST               /rules/{id}/preview   -> preview_rule
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(events::list).post(events::create))
        .route(
            "/{id}",
            get(events::get_by_id)
                .put(events::update)
                .delete(events::delete),
        )
        .route("/{id}/complete", post(events::toggle_complete))
        .route("/rules", get(events::list_rules).post(events::create_rule))
        .route("/rules/run", post(events::run_rules))
        .route(
            "/rules/{id}",
            get(events::get_rule)
                .put(events::update_rule)
                .delete(events::delete_rule),
        )
        .route("/rules/{id}/preview", post(events::preview_rule))
}
