//! Calendar event and event rule models and DTOs.

use kennel_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub event_type: String,
    pub event_date: Date,
    pub end_date: Option<Date>,
    pub all_day: bool,
    pub litter_id: Option<DbId>,
    pub dog_id: Option<DbId>,
    pub puppy_id: Option<DbId>,
    pub rule_id: Option<DbId>,
    pub is_completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateEvent {
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `custom`.
    pub event_type: Option<String>,
    pub event_date: Date,
    pub end_date: Option<Date>,
    pub all_day: Option<bool>,
    pub litter_id: Option<DbId>,
    pub dog_id: Option<DbId>,
    pub puppy_id: Option<DbId>,
    #[serde(skip)]
    pub rule_id: Option<DbId>,
}

/// DTO for updating an event. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_type: Option<String>,
    pub event_date: Option<Date>,
    pub end_date: Option<Date>,
    pub all_day: Option<bool>,
    pub is_completed: Option<bool>,
}

/// Query-string filters for listing events.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventListParams {
    /// Inclusive lower bound on `event_date`.
    pub start: Option<Date>,
    /// Inclusive upper bound on `event_date`.
    pub end: Option<Date>,
    pub event_type: Option<String>,
    pub litter_id: Option<DbId>,
    pub dog_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Event rules
// ---------------------------------------------------------------------------

/// A row from the `event_rules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventRule {
    pub id: DbId,
    pub name: String,
    pub trigger_type: String,
    pub conditions: serde_json::Value,
    pub action_type: String,
    pub action_config: serde_json::Value,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an event rule.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventRule {
    pub name: String,
    pub trigger_type: String,
    /// Defaults to `{}` (always matches).
    pub conditions: Option<serde_json::Value>,
    pub action_type: String,
    pub action_config: Option<serde_json::Value>,
    pub is_active: Option<bool>,
}

/// DTO for updating an event rule. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEventRule {
    pub name: Option<String>,
    pub trigger_type: Option<String>,
    pub conditions: Option<serde_json::Value>,
    pub action_type: Option<String>,
    pub action_config: Option<serde_json::Value>,
    pub is_active: Option<bool>,
}

/// Query-string filters for listing rules.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventRuleListParams {
    pub trigger_type: Option<String>,
    pub is_active: Option<bool>,
}

/// The subject a trigger fired for. Exactly one id is expected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleSubject {
    pub litter_id: Option<DbId>,
    pub dog_id: Option<DbId>,
    pub puppy_id: Option<DbId>,
    pub vaccination_id: Option<DbId>,
}

/// Request body for `POST /events/rules/run`.
#[derive(Debug, Clone, Deserialize)]
pub struct RunRulesRequest {
    pub trigger_type: String,
    #[serde(flatten)]
    pub subject: RuleSubject,
}

/// Result of evaluating a rule without writing anything.
#[derive(Debug, Clone, Serialize)]
pub struct RulePreview {
    pub rule_id: DbId,
    pub matches: bool,
    pub events: Vec<kennel_core::calendar::PlannedEvent>,
}
