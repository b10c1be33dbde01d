//! Handlers for CMS pages (`/pages`).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kennel_core::pages;
use kennel_core::types::DbId;
use kennel_core::validate;
use kennel_db::models::page::{CreatePage, PageListParams, UpdatePage};
use kennel_db::repositories::PageRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/pages
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PageListParams>,
) -> AppResult<impl IntoResponse> {
    let items = PageRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/pages/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let page = PageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Page", id))?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/pages/slug/{slug} (public)
///
/// Unpublished pages are reported as missing.
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let page = PageRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No published page with slug '{slug}'")))?;
    Ok(Json(DataResponse { data: page }))
}

/// POST /api/pages
///
/// The slug is generated from the title when omitted. A duplicate slug is a
/// 409 from the `uq_pages_slug` constraint.
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePage>,
) -> AppResult<impl IntoResponse> {
    validate::non_empty("title", &input.title)?;
    let slug = pages::resolve_slug(input.slug.as_deref(), &input.title)?;

    let page = PageRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(page_id = page.id, slug = %page.slug, "Page created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: page })))
}

/// PUT /api/pages/{id}
///
/// The first publish stamps `published_at`; unpublishing keeps it.
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdatePage>,
) -> AppResult<impl IntoResponse> {
    if let Some(title) = input.title.as_deref() {
        validate::non_empty("title", title)?;
    }
    if let Some(slug) = input.slug.as_mut() {
        *slug = slug.trim().to_string();
        pages::validate_slug(slug)?;
    }

    let page = PageRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Page", id))?;

    tracing::info!(page_id = id, is_published = page.is_published, "Page updated");

    Ok(Json(DataResponse { data: page }))
}

/// DELETE /api/pages/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if PageRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Page", id))
    }
}
