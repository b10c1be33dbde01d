//! Route definitions for dog and puppy health, mounted at `/health`.

use axum::routing::get;
use axum::Router;

use crate::handlers::health;
use crate::state::AppState;

/// Health record and vaccination routes mounted at `/health`.
///
/// ```text
/// GET, POST          /records                 -> list_records, create_record
/// GET, PUT, DELETE   /records/{id}            -> get_record, update_record, delete_record
/// GET, POST          /vaccinations            -> list_vaccinations, create_vaccination
/// GET                /vaccinations/due        -> due_vaccinations
/// GET, PUT, DELETE   /vaccinations/{id}       -> get_vaccination, update_vaccination, delete_vaccination
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/records",
            get(health::list_records).post(health::create_record),
        )
        .route(
            "/records/{id}",
            get(health::get_record)
                .put(health::update_record)
                .delete(health::delete_record),
        )
        .route(
            "/vaccinations",
            get(health::list_vaccinations).post(health::create_vaccination),
        )
        .route("/vaccinations/due", get(health::due_vaccinations))
        .route(
            "/vaccinations/{id}",
            get(health::get_vaccination)
                .put(health::update_vaccination)
                .delete(health::delete_vaccination),
        )
}
