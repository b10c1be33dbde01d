//! Handlers for calendar events (`/events`) and event rules (`/events/rules`).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kennel_core::calendar;
use kennel_core::error::CoreError;
use kennel_core::rules::{self, RuleDefinition};
use kennel_core::types::DbId;
use kennel_core::validate;
use kennel_db::models::event::{
    CreateEvent, CreateEventRule, EventListParams, EventRuleListParams, RulePreview, RuleSubject,
    RunRulesRequest, UpdateEvent, UpdateEventRule,
};
use kennel_db::repositories::{EventRepo, EventRuleRepo};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::triggers;

// ---------------------------------------------------------------------------
// Calendar events
// ---------------------------------------------------------------------------

/// GET /api/events
///
/// Filters: `start`/`end` (inclusive date range), `event_type`, `litter_id`,
/// `dog_id`. Ordered by date.
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<EventListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(event_type) = params.event_type.as_deref() {
        calendar::validate_event_type(event_type)?;
    }
    if let (Some(start), Some(end)) = (params.start, params.end) {
        if end < start {
            return Err(AppError::BadRequest("end must not be before start".into()));
        }
    }
    let items = EventRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/events/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Event", id))?;
    Ok(Json(DataResponse { data: event }))
}

/// POST /api/events
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateEvent>,
) -> AppResult<impl IntoResponse> {
    validate::non_empty("title", &input.title)?;
    if let Some(event_type) = input.event_type.as_deref() {
        calendar::validate_event_type(event_type)?;
    }
    calendar::validate_event_dates(input.event_date, input.end_date)?;

    let event = EventRepo::create(&state.pool, &input).await?;

    tracing::info!(event_id = event.id, date = %event.event_date, "Event created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// PUT /api/events/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEvent>,
) -> AppResult<impl IntoResponse> {
    let existing = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Event", id))?;

    if let Some(title) = input.title.as_deref() {
        validate::non_empty("title", title)?;
    }
    if let Some(event_type) = input.event_type.as_deref() {
        calendar::validate_event_type(event_type)?;
    }
    calendar::validate_event_dates(
        input.event_date.unwrap_or(existing.event_date),
        input.end_date.or(existing.end_date),
    )?;

    let event = EventRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Event", id))?;
    Ok(Json(DataResponse { data: event }))
}

/// POST /api/events/{id}/complete
///
/// Toggles `is_completed`.
pub async fn toggle_complete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let event = EventRepo::toggle_completed(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Event", id))?;

    tracing::debug!(event_id = id, is_completed = event.is_completed, "Event completion toggled");

    Ok(Json(DataResponse { data: event }))
}

/// DELETE /api/events/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if EventRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Event", id))
    }
}

// ---------------------------------------------------------------------------
// Event rules
// ---------------------------------------------------------------------------

/// GET /api/events/rules
pub async fn list_rules(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<EventRuleListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(trigger_type) = params.trigger_type.as_deref() {
        rules::validate_trigger_type(trigger_type)?;
    }
    let items = EventRuleRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/events/rules/{id}
pub async fn get_rule(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let rule = EventRuleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("EventRule", id))?;
    Ok(Json(DataResponse { data: rule }))
}

/// POST /api/events/rules
pub async fn create_rule(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateEventRule>,
) -> AppResult<impl IntoResponse> {
    validate::non_empty("name", &input.name)?;
    let empty = json!({});
    rules::validate_rule(&RuleDefinition {
        trigger_type: &input.trigger_type,
        conditions: input.conditions.as_ref().unwrap_or(&empty),
        action_type: &input.action_type,
        action_config: input.action_config.as_ref().unwrap_or(&empty),
    })?;

    let rule = EventRuleRepo::create(&state.pool, &input).await?;

    tracing::info!(
        rule_id = rule.id,
        trigger = %rule.trigger_type,
        action = %rule.action_type,
        "Event rule created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: rule })))
}

/// PUT /api/events/rules/{id}
///
/// The merged rule (stored values overlaid with the update) is validated as
/// a whole, so changing the trigger alone cannot leave an invalid action.
pub async fn update_rule(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEventRule>,
) -> AppResult<impl IntoResponse> {
    let existing = EventRuleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("EventRule", id))?;

    if let Some(name) = input.name.as_deref() {
        validate::non_empty("name", name)?;
    }
    rules::validate_rule(&RuleDefinition {
        trigger_type: input.trigger_type.as_deref().unwrap_or(&existing.trigger_type),
        conditions: input.conditions.as_ref().unwrap_or(&existing.conditions),
        action_type: input.action_type.as_deref().unwrap_or(&existing.action_type),
        action_config: input.action_config.as_ref().unwrap_or(&existing.action_config),
    })?;

    let rule = EventRuleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("EventRule", id))?;

    tracing::info!(rule_id = id, is_active = rule.is_active, "Event rule updated");

    Ok(Json(DataResponse { data: rule }))
}

/// DELETE /api/events/rules/{id}
///
/// Events the rule created stay on the calendar with `rule_id` cleared.
pub async fn delete_rule(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if EventRuleRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("EventRule", id))
    }
}

/// POST /api/events/rules/run
///
/// Runs every active rule for `trigger_type` against the subject named by
/// `litter_id`, `dog_id`, `puppy_id` or `vaccination_id` and returns the
/// events created.
pub async fn run_rules(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<RunRulesRequest>,
) -> AppResult<impl IntoResponse> {
    let triggered = triggers::resolve(&state.pool, &input.trigger_type, &input.subject).await?;
    let events = triggers::run(&state.pool, &triggered).await?;

    tracing::info!(
        trigger = %input.trigger_type,
        count = events.len(),
        "Event rules run on demand"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: events })))
}

/// POST /api/events/rules/{id}/preview
///
/// Evaluates one rule (active or not) against a subject without writing.
pub async fn preview_rule(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(subject): Json<RuleSubject>,
) -> AppResult<impl IntoResponse> {
    let rule = EventRuleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("EventRule", id))?;

    let triggered = triggers::resolve(&state.pool, &rule.trigger_type, &subject).await?;
    let matches = rules::rule_matches(&triggers::definition(&rule), &triggered.ctx);
    let events = triggers::plan(&rule, &triggered).map_err(|e| match e {
        CoreError::Validation(msg) => AppError::Core(CoreError::Validation(format!(
            "Rule {id} cannot be applied: {msg}"
        ))),
        other => AppError::Core(other),
    })?;

    Ok(Json(DataResponse {
        data: RulePreview {
            rule_id: id,
            matches,
            events,
        },
    }))
}
