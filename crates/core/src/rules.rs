//! Event automation rules: trigger type + condition + action.
//!
//! A rule fires when its trigger occurs and its conditions match the
//! trigger's subject (a litter, dog, puppy or vaccination serialized to a
//! flat JSON object). Its action then plans calendar events relative to the
//! trigger's anchor date. Everything here is pure; persistence of the planned
//! events happens in the API layer.

use chrono::TimeDelta;
use serde_json::{Map, Value};

use crate::calendar::{self, PlannedEvent, EVENT_CUSTOM};
use crate::error::CoreError;
use crate::milestones;
use crate::types::Date;
use crate::validate;

// ---------------------------------------------------------------------------
// Triggers and actions
// ---------------------------------------------------------------------------

/// A litter received a breeding date. Anchor: the breeding date.
pub const TRIGGER_LITTER_BRED: &str = "litter_bred";
/// A litter received a whelp date. Anchor: the whelp date.
pub const TRIGGER_LITTER_WHELPED: &str = "litter_whelped";
/// A puppy was marked sold. Anchor: the day of the sale.
pub const TRIGGER_PUPPY_SOLD: &str = "puppy_sold";
/// A dog was added. Anchor: the day it was added.
pub const TRIGGER_DOG_ADDED: &str = "dog_added";
/// A vaccination was recorded. Anchor: the administered date.
pub const TRIGGER_VACCINATION_RECORDED: &str = "vaccination_recorded";

/// Valid trigger types.
pub const VALID_TRIGGERS: &[&str] = &[
    TRIGGER_LITTER_BRED,
    TRIGGER_LITTER_WHELPED,
    TRIGGER_PUPPY_SOLD,
    TRIGGER_DOG_ADDED,
    TRIGGER_VACCINATION_RECORDED,
];

/// Create a single event `offset_days` after the anchor.
pub const ACTION_CREATE_EVENT: &str = "create_event";
/// Create the standard milestone schedule for a litter trigger.
pub const ACTION_CREATE_MILESTONES: &str = "create_milestones";

/// Valid action types.
pub const VALID_ACTIONS: &[&str] = &[ACTION_CREATE_EVENT, ACTION_CREATE_MILESTONES];

/// Condition operators accepted in `{ "field": { "<op>": value } }` form.
pub const VALID_OPERATORS: &[&str] = &["eq", "ne", "gt", "gte", "lt", "lte", "in", "exists"];

/// Largest `offset_days` magnitude a `create_event` action may use.
pub const MAX_OFFSET_DAYS: i64 = 3650;

/// Placeholder in action titles replaced with the subject's label.
pub const NAME_PLACEHOLDER: &str = "{name}";

// ---------------------------------------------------------------------------
// Rule definition
// ---------------------------------------------------------------------------

/// The parts of a stored rule the engine needs.
#[derive(Debug, Clone, Copy)]
pub struct RuleDefinition<'a> {
    pub trigger_type: &'a str,
    pub conditions: &'a Value,
    pub action_type: &'a str,
    pub action_config: &'a Value,
}

/// The occurrence of a trigger for a specific subject.
#[derive(Debug, Clone)]
pub struct TriggerContext {
    pub trigger_type: String,
    /// Date that action offsets are counted from.
    pub anchor_date: Date,
    /// Human-readable subject name (litter/dog/puppy name) for titles.
    pub subject_label: Option<String>,
    /// Subject fields that conditions are evaluated against.
    pub fields: Map<String, Value>,
}

pub fn validate_trigger_type(trigger_type: &str) -> Result<(), CoreError> {
    validate::one_of("trigger_type", trigger_type, VALID_TRIGGERS)
}

pub fn validate_action_type(action_type: &str) -> Result<(), CoreError> {
    validate::one_of("action_type", action_type, VALID_ACTIONS)
}

/// Validate a rule before it is stored.
pub fn validate_rule(rule: &RuleDefinition<'_>) -> Result<(), CoreError> {
    validate_trigger_type(rule.trigger_type)?;
    validate_action_type(rule.action_type)?;
    validate_conditions(rule.conditions)?;

    let config = rule
        .action_config
        .as_object()
        .ok_or_else(|| CoreError::Validation("action_config must be a JSON object".into()))?;

    match rule.action_type {
        ACTION_CREATE_EVENT => {
            let title = config.get("title").and_then(Value::as_str).unwrap_or("");
            validate::non_empty("action_config.title", title)?;
            if let Some(offset) = config.get("offset_days") {
                let offset = offset.as_i64().ok_or_else(|| {
                    CoreError::Validation("action_config.offset_days must be an integer".into())
                })?;
                if !(-MAX_OFFSET_DAYS..=MAX_OFFSET_DAYS).contains(&offset) {
                    return Err(CoreError::Validation(format!(
                        "action_config.offset_days must be between -{MAX_OFFSET_DAYS} and {MAX_OFFSET_DAYS}"
                    )));
                }
            }
            if let Some(event_type) = config.get("event_type") {
                let event_type = event_type.as_str().ok_or_else(|| {
                    CoreError::Validation("action_config.event_type must be a string".into())
                })?;
                calendar::validate_event_type(event_type)?;
            }
        }
        ACTION_CREATE_MILESTONES => {
            if rule.trigger_type != TRIGGER_LITTER_BRED
                && rule.trigger_type != TRIGGER_LITTER_WHELPED
            {
                return Err(CoreError::Validation(format!(
                    "{ACTION_CREATE_MILESTONES} requires a litter trigger \
                     ({TRIGGER_LITTER_BRED} or {TRIGGER_LITTER_WHELPED})"
                )));
            }
        }
        _ => {}
    }
    Ok(())
}

/// Validate the shape of a conditions object.
pub fn validate_conditions(conditions: &Value) -> Result<(), CoreError> {
    let obj = match conditions {
        Value::Null => return Ok(()),
        Value::Object(obj) => obj,
        _ => {
            return Err(CoreError::Validation(
                "conditions must be a JSON object".into(),
            ))
        }
    };

    for (field, expected) in obj {
        let Value::Object(ops) = expected else {
            continue;
        };
        if ops.is_empty() {
            return Err(CoreError::Validation(format!(
                "Condition on '{field}' has no operator"
            )));
        }
        for (op, operand) in ops {
            if !VALID_OPERATORS.contains(&op.as_str()) {
                return Err(CoreError::Validation(format!(
                    "Unknown condition operator '{op}' on '{field}'. Must be one of: {}",
                    VALID_OPERATORS.join(", ")
                )));
            }
            if op == "in" && !operand.is_array() {
                return Err(CoreError::Validation(format!(
                    "Operator 'in' on '{field}' requires an array"
                )));
            }
            if op == "exists" && !operand.is_boolean() {
                return Err(CoreError::Validation(format!(
                    "Operator 'exists' on '{field}' requires a boolean"
                )));
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Evaluate a conditions object against subject fields.
///
/// Every entry must hold (AND). A bare value means equality; an object maps
/// operators to operands. Null or an empty object always matches.
pub fn evaluate_conditions(conditions: &Value, fields: &Map<String, Value>) -> bool {
    let obj = match conditions {
        Value::Object(obj) => obj,
        _ => return true,
    };

    obj.iter().all(|(field, expected)| {
        let actual = fields.get(field).filter(|v| !v.is_null());
        match expected {
            Value::Object(ops) => ops
                .iter()
                .all(|(op, operand)| evaluate_operator(op, operand, actual)),
            other => actual.is_some_and(|a| values_equal(a, other)),
        }
    })
}

fn evaluate_operator(op: &str, operand: &Value, actual: Option<&Value>) -> bool {
    match op {
        "exists" => operand.as_bool().unwrap_or(true) == actual.is_some(),
        "eq" => actual.is_some_and(|a| values_equal(a, operand)),
        "ne" => !actual.is_some_and(|a| values_equal(a, operand)),
        "in" => match (actual, operand.as_array()) {
            (Some(a), Some(options)) => options.iter().any(|o| values_equal(a, o)),
            _ => false,
        },
        "gt" | "gte" | "lt" | "lte" => {
            let Some(ordering) = actual.and_then(|a| compare_values(a, operand)) else {
                return false;
            };
            match op {
                "gt" => ordering.is_gt(),
                "gte" => ordering.is_ge(),
                "lt" => ordering.is_lt(),
                _ => ordering.is_le(),
            }
        }
        _ => false,
    }
}

/// Equality with numeric coercion, so `6` matches `6.0`.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

/// Order numbers numerically and strings lexically (ISO dates sort
/// correctly as strings). Mixed types do not compare.
fn compare_values(a: &Value, b: &Value) -> Option<std::cmp::Ordering> {
    if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
        return x.partial_cmp(&y);
    }
    match (a.as_str(), b.as_str()) {
        (Some(x), Some(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Whether a rule fires for a trigger occurrence.
pub fn rule_matches(rule: &RuleDefinition<'_>, ctx: &TriggerContext) -> bool {
    rule.trigger_type == ctx.trigger_type && evaluate_conditions(rule.conditions, &ctx.fields)
}

/// Plan the events a rule's action creates for a trigger occurrence.
///
/// Returns an empty list when the rule does not match.
pub fn plan_actions(
    rule: &RuleDefinition<'_>,
    ctx: &TriggerContext,
) -> Result<Vec<PlannedEvent>, CoreError> {
    if !rule_matches(rule, ctx) {
        return Ok(Vec::new());
    }

    let label = ctx.subject_label.as_deref();
    match rule.action_type {
        ACTION_CREATE_EVENT => {
            let config = rule.action_config;
            let title = config
                .get("title")
                .and_then(Value::as_str)
                .ok_or_else(|| CoreError::Validation("action_config.title is required".into()))?;
            let offset = config.get("offset_days").and_then(Value::as_i64).unwrap_or(0);
            let event_type = config
                .get("event_type")
                .and_then(Value::as_str)
                .unwrap_or(EVENT_CUSTOM);
            let description = config
                .get("description")
                .and_then(Value::as_str)
                .map(|d| fill_placeholder(d, label));
            let event_date = TimeDelta::try_days(offset)
                .and_then(|delta| ctx.anchor_date.checked_add_signed(delta))
                .ok_or_else(|| {
                    CoreError::Validation(format!(
                        "offset_days {offset} moves the event outside the calendar"
                    ))
                })?;

            Ok(vec![PlannedEvent {
                title: fill_placeholder(title, label),
                description,
                event_type: event_type.to_string(),
                event_date,
            }])
        }
        ACTION_CREATE_MILESTONES => match ctx.trigger_type.as_str() {
            TRIGGER_LITTER_WHELPED => Ok(milestones::whelp_milestones(ctx.anchor_date, label)),
            TRIGGER_LITTER_BRED => Ok(milestones::pregnancy_milestones(ctx.anchor_date, label)),
            other => Err(CoreError::Validation(format!(
                "{ACTION_CREATE_MILESTONES} cannot run for trigger '{other}'"
            ))),
        },
        other => Err(CoreError::Validation(format!(
            "Unknown action_type '{other}'"
        ))),
    }
}

fn fill_placeholder(text: &str, label: Option<&str>) -> String {
    text.replace(NAME_PLACEHOLDER, label.unwrap_or(""))
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn litter_ctx(trigger: &str) -> TriggerContext {
        TriggerContext {
            trigger_type: trigger.to_string(),
            anchor_date: date(2026, 3, 1),
            subject_label: Some("Bella x Duke".to_string()),
            fields: fields(json!({
                "id": 7,
                "status": "whelped",
                "puppy_count": 6,
                "whelp_date": "2026-03-01",
                "sire_id": null
            })),
        }
    }

    // -- conditions --

    #[test]
    fn empty_conditions_always_match() {
        assert!(evaluate_conditions(&json!({}), &Map::new()));
        assert!(evaluate_conditions(&Value::Null, &Map::new()));
    }

    #[test]
    fn bare_value_means_equality() {
        let f = fields(json!({"status": "whelped", "puppy_count": 6}));
        assert!(evaluate_conditions(&json!({"status": "whelped"}), &f));
        assert!(evaluate_conditions(&json!({"puppy_count": 6.0}), &f));
        assert!(!evaluate_conditions(&json!({"status": "planned"}), &f));
    }

    #[test]
    fn missing_field_fails_equality() {
        assert!(!evaluate_conditions(&json!({"breed": "Labrador"}), &Map::new()));
    }

    #[test]
    fn numeric_operators() {
        let f = fields(json!({"puppy_count": 6}));
        assert!(evaluate_conditions(&json!({"puppy_count": {"gte": 6}}), &f));
        assert!(evaluate_conditions(&json!({"puppy_count": {"gt": 4, "lt": 8}}), &f));
        assert!(!evaluate_conditions(&json!({"puppy_count": {"gt": 6}}), &f));
        assert!(evaluate_conditions(&json!({"puppy_count": {"lte": 6}}), &f));
    }

    #[test]
    fn date_strings_compare_lexically() {
        let f = fields(json!({"whelp_date": "2026-03-01"}));
        assert!(evaluate_conditions(&json!({"whelp_date": {"gte": "2026-01-01"}}), &f));
        assert!(!evaluate_conditions(&json!({"whelp_date": {"lt": "2026-02-01"}}), &f));
    }

    #[test]
    fn mixed_types_do_not_compare() {
        let f = fields(json!({"puppy_count": 6}));
        assert!(!evaluate_conditions(&json!({"puppy_count": {"gt": "five"}}), &f));
    }

    #[test]
    fn in_and_ne_operators() {
        let f = fields(json!({"status": "sold"}));
        assert!(evaluate_conditions(&json!({"status": {"in": ["sold", "reserved"]}}), &f));
        assert!(!evaluate_conditions(&json!({"status": {"in": ["kept"]}}), &f));
        assert!(evaluate_conditions(&json!({"status": {"ne": "kept"}}), &f));
        assert!(evaluate_conditions(&json!({"missing": {"ne": "x"}}), &f));
    }

    #[test]
    fn exists_treats_null_as_absent() {
        let f = fields(json!({"sire_id": null, "dam_id": 3}));
        assert!(evaluate_conditions(&json!({"sire_id": {"exists": false}}), &f));
        assert!(evaluate_conditions(&json!({"dam_id": {"exists": true}}), &f));
        assert!(!evaluate_conditions(&json!({"sire_id": {"exists": true}}), &f));
    }

    // -- validation --

    #[test]
    fn unknown_operator_rejected() {
        let err = validate_conditions(&json!({"status": {"like": "s%"}})).unwrap_err();
        assert!(err.to_string().contains("Unknown condition operator 'like'"));
    }

    #[test]
    fn conditions_must_be_object() {
        assert!(validate_conditions(&json!(["status"])).is_err());
        assert!(validate_conditions(&json!({"status": {"in": "sold"}})).is_err());
        assert!(validate_conditions(&json!({"status": {}})).is_err());
        assert!(validate_conditions(&json!({"status": "sold"})).is_ok());
    }

    #[test]
    fn create_event_requires_title() {
        let rule = RuleDefinition {
            trigger_type: TRIGGER_PUPPY_SOLD,
            conditions: &json!({}),
            action_type: ACTION_CREATE_EVENT,
            action_config: &json!({"offset_days": 7}),
        };
        assert_matches!(validate_rule(&rule), Err(CoreError::Validation(_)));
    }

    #[test]
    fn create_event_checks_event_type() {
        let rule = RuleDefinition {
            trigger_type: TRIGGER_PUPPY_SOLD,
            conditions: &json!({}),
            action_type: ACTION_CREATE_EVENT,
            action_config: &json!({"title": "Follow up", "event_type": "party"}),
        };
        assert!(validate_rule(&rule).is_err());
    }

    #[test]
    fn create_event_offset_bounded() {
        let config = json!({"title": "Far future", "offset_days": 1_000_000_000});
        let rule = RuleDefinition {
            trigger_type: TRIGGER_LITTER_BRED,
            conditions: &json!({}),
            action_type: ACTION_CREATE_EVENT,
            action_config: &config,
        };
        assert_matches!(validate_rule(&rule), Err(CoreError::Validation(_)));

        let config = json!({"title": "Next year", "offset_days": MAX_OFFSET_DAYS});
        let rule = RuleDefinition {
            action_config: &config,
            ..rule
        };
        assert!(validate_rule(&rule).is_ok());
    }

    #[test]
    fn milestones_only_for_litter_triggers() {
        let rule = RuleDefinition {
            trigger_type: TRIGGER_DOG_ADDED,
            conditions: &json!({}),
            action_type: ACTION_CREATE_MILESTONES,
            action_config: &json!({}),
        };
        assert!(validate_rule(&rule).is_err());

        let rule = RuleDefinition {
            trigger_type: TRIGGER_LITTER_WHELPED,
            ..rule
        };
        assert!(validate_rule(&rule).is_ok());
    }

    #[test]
    fn unknown_trigger_rejected() {
        let rule = RuleDefinition {
            trigger_type: "litter_sold",
            conditions: &json!({}),
            action_type: ACTION_CREATE_EVENT,
            action_config: &json!({"title": "x"}),
        };
        assert!(validate_rule(&rule).is_err());
    }

    // -- planning --

    #[test]
    fn create_event_offsets_anchor_and_fills_name() {
        let config = json!({
            "title": "Puppy photos for {name}",
            "offset_days": 28,
            "event_type": "milestone",
            "description": "Take photos of {name}"
        });
        let rule = RuleDefinition {
            trigger_type: TRIGGER_LITTER_WHELPED,
            conditions: &json!({"puppy_count": {"gte": 1}}),
            action_type: ACTION_CREATE_EVENT,
            action_config: &config,
        };
        let planned = plan_actions(&rule, &litter_ctx(TRIGGER_LITTER_WHELPED)).unwrap();
        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].title, "Puppy photos for Bella x Duke");
        assert_eq!(planned[0].event_date, date(2026, 3, 29));
        assert_eq!(planned[0].event_type, "milestone");
        assert_eq!(
            planned[0].description.as_deref(),
            Some("Take photos of Bella x Duke")
        );
    }

    #[test]
    fn create_event_defaults_to_custom_same_day() {
        let config = json!({"title": "Check in"});
        let rule = RuleDefinition {
            trigger_type: TRIGGER_LITTER_WHELPED,
            conditions: &json!({}),
            action_type: ACTION_CREATE_EVENT,
            action_config: &config,
        };
        let planned = plan_actions(&rule, &litter_ctx(TRIGGER_LITTER_WHELPED)).unwrap();
        assert_eq!(planned[0].event_type, EVENT_CUSTOM);
        assert_eq!(planned[0].event_date, date(2026, 3, 1));
    }

    #[test]
    fn out_of_calendar_offset_is_an_error() {
        let config = json!({"title": "Far future", "offset_days": 1_000_000_000});
        let rule = RuleDefinition {
            trigger_type: TRIGGER_LITTER_WHELPED,
            conditions: &json!({}),
            action_type: ACTION_CREATE_EVENT,
            action_config: &config,
        };
        assert_matches!(
            plan_actions(&rule, &litter_ctx(TRIGGER_LITTER_WHELPED)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn non_matching_rule_plans_nothing() {
        let config = json!({"title": "Big litter"});
        let rule = RuleDefinition {
            trigger_type: TRIGGER_LITTER_WHELPED,
            conditions: &json!({"puppy_count": {"gt": 10}}),
            action_type: ACTION_CREATE_EVENT,
            action_config: &config,
        };
        assert!(plan_actions(&rule, &litter_ctx(TRIGGER_LITTER_WHELPED))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn other_trigger_plans_nothing() {
        let config = json!({"title": "x"});
        let rule = RuleDefinition {
            trigger_type: TRIGGER_LITTER_BRED,
            conditions: &json!({}),
            action_type: ACTION_CREATE_EVENT,
            action_config: &config,
        };
        assert!(plan_actions(&rule, &litter_ctx(TRIGGER_LITTER_WHELPED))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn create_milestones_uses_whelp_schedule() {
        let rule = RuleDefinition {
            trigger_type: TRIGGER_LITTER_WHELPED,
            conditions: &json!({}),
            action_type: ACTION_CREATE_MILESTONES,
            action_config: &json!({}),
        };
        let planned = plan_actions(&rule, &litter_ctx(TRIGGER_LITTER_WHELPED)).unwrap();
        assert_eq!(planned.len(), milestones::WHELP_MILESTONES.len());
        assert_eq!(planned[0].title, "Bella x Duke: Dewclaw check");
    }
}
