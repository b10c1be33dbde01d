use axum::routing::get;
use axum::Router;

use crate::handlers::search;
use crate::state::AppState;

/// Search route mounted at `/search`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(search::search))
}
