//! Calendar event types and the planned-event value shared by milestone
//! generation and the rule engine.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::Date;
use crate::validate;

pub const EVENT_BREEDING: &str = "breeding";
pub const EVENT_PREGNANCY: &str = "pregnancy";
pub const EVENT_WHELPING: &str = "whelping";
pub const EVENT_MILESTONE: &str = "milestone";
pub const EVENT_VET: &str = "vet";
pub const EVENT_VACCINATION: &str = "vaccination";
pub const EVENT_SHOW: &str = "show";
pub const EVENT_CUSTOM: &str = "custom";

/// Valid calendar event types.
pub const VALID_EVENT_TYPES: &[&str] = &[
    EVENT_BREEDING,
    EVENT_PREGNANCY,
    EVENT_WHELPING,
    EVENT_MILESTONE,
    EVENT_VET,
    EVENT_VACCINATION,
    EVENT_SHOW,
    EVENT_CUSTOM,
];

pub fn validate_event_type(event_type: &str) -> Result<(), CoreError> {
    validate::one_of("event_type", event_type, VALID_EVENT_TYPES)
}

/// An event's end date, when present, cannot precede its start.
pub fn validate_event_dates(event_date: Date, end_date: Option<Date>) -> Result<(), CoreError> {
    match end_date {
        Some(end) if end < event_date => Err(CoreError::Validation(
            "end_date cannot be before event_date".into(),
        )),
        _ => Ok(()),
    }
}

/// A calendar event computed by the milestone tables or a rule action,
/// not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedEvent {
    pub title: String,
    pub description: Option<String>,
    pub event_type: String,
    pub event_date: Date,
}

/// Drop planned events that already exist (same title on the same date).
///
/// Keeps generation idempotent when a litter's events are generated twice.
pub fn drop_existing(planned: Vec<PlannedEvent>, existing: &[(String, Date)]) -> Vec<PlannedEvent> {
    planned
        .into_iter()
        .filter(|p| {
            !existing
                .iter()
                .any(|(title, date)| *title == p.title && *date == p.event_date)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    fn planned(title: &str, d: Date) -> PlannedEvent {
        PlannedEvent {
            title: title.to_string(),
            description: None,
            event_type: EVENT_MILESTONE.to_string(),
            event_date: d,
        }
    }

    #[test]
    fn event_types_validated() {
        assert!(validate_event_type("vet").is_ok());
        assert!(validate_event_type("party").is_err());
    }

    #[test]
    fn end_before_start_rejected() {
        assert!(validate_event_dates(date(2026, 1, 2), Some(date(2026, 1, 1))).is_err());
        assert!(validate_event_dates(date(2026, 1, 2), Some(date(2026, 1, 2))).is_ok());
        assert!(validate_event_dates(date(2026, 1, 2), None).is_ok());
    }

    #[test]
    fn drop_existing_skips_same_title_and_date() {
        let plans = vec![
            planned("Eyes opening", date(2026, 3, 15)),
            planned("Start weaning", date(2026, 3, 22)),
        ];
        let existing = vec![("Eyes opening".to_string(), date(2026, 3, 15))];
        let kept = drop_existing(plans, &existing);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title, "Start weaning");
    }

    #[test]
    fn drop_existing_keeps_same_title_on_other_date() {
        let plans = vec![planned("Eyes opening", date(2026, 3, 16))];
        let existing = vec![("Eyes opening".to_string(), date(2026, 3, 15))];
        assert_eq!(drop_existing(plans, &existing).len(), 1);
    }
}
