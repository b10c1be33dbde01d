//! Cross-entity search (`/search`).

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use kennel_core::pagination::clamp_limit;
use kennel_core::search::{self, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};
use kennel_db::models::search::{SearchHit, SearchParams};
use kennel_db::repositories::SearchRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/search?q=&types=&limit=
///
/// Queries shorter than two characters return an empty list without touching
/// the database.
pub async fn search(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let entity_types = search::parse_entity_types(params.types.as_deref())?;
    let Some(pattern) = params.q.as_deref().and_then(search::like_pattern) else {
        return Ok(Json(DataResponse {
            data: Vec::<SearchHit>::new(),
        }));
    };
    let limit = clamp_limit(params.limit, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT);

    let hits = SearchRepo::search(&state.pool, &pattern, &entity_types, limit).await?;

    tracing::debug!(types = ?entity_types, limit, hits = hits.len(), "Search");

    Ok(Json(DataResponse { data: hits }))
}
