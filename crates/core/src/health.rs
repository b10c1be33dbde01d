//! Health record and vaccination rules.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::Date;
use crate::validate;

pub const RECORD_EXAM: &str = "exam";
pub const RECORD_TEST: &str = "test";
pub const RECORD_TREATMENT: &str = "treatment";
pub const RECORD_SURGERY: &str = "surgery";
pub const RECORD_ILLNESS: &str = "illness";
pub const RECORD_OTHER: &str = "other";

/// Valid health record types.
pub const VALID_RECORD_TYPES: &[&str] = &[
    RECORD_EXAM,
    RECORD_TEST,
    RECORD_TREATMENT,
    RECORD_SURGERY,
    RECORD_ILLNESS,
    RECORD_OTHER,
];

/// Default look-ahead window for the due-vaccinations report.
pub const DEFAULT_DUE_WITHIN_DAYS: i64 = 30;

/// Maximum look-ahead window for the due-vaccinations report.
pub const MAX_DUE_WITHIN_DAYS: i64 = 365;

pub fn validate_record_type(record_type: &str) -> Result<(), CoreError> {
    validate::one_of("record_type", record_type, VALID_RECORD_TYPES)
}

/// Symptoms are stored as a JSON array of non-empty strings.
pub fn validate_symptoms(symptoms: &serde_json::Value) -> Result<(), CoreError> {
    let items = symptoms
        .as_array()
        .ok_or_else(|| CoreError::Validation("symptoms must be an array of strings".into()))?;
    for item in items {
        match item.as_str() {
            Some(s) if !s.trim().is_empty() => {}
            _ => {
                return Err(CoreError::Validation(
                    "symptoms must be an array of non-empty strings".into(),
                ))
            }
        }
    }
    Ok(())
}

/// The next due date of a vaccination cannot precede its administration.
pub fn validate_vaccination_dates(
    administered_date: Date,
    next_due_date: Option<Date>,
) -> Result<(), CoreError> {
    match next_due_date {
        Some(due) if due < administered_date => Err(CoreError::Validation(
            "next_due_date cannot be before administered_date".into(),
        )),
        _ => Ok(()),
    }
}

/// How urgent a vaccination's next dose is relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DueState {
    Overdue,
    DueSoon,
    UpToDate,
}

/// Classify a vaccination's due date against `today` and a look-ahead window.
pub fn classify_due(next_due_date: Date, today: Date, within_days: i64) -> DueState {
    if next_due_date < today {
        DueState::Overdue
    } else if (next_due_date - today).num_days() <= within_days {
        DueState::DueSoon
    } else {
        DueState::UpToDate
    }
}

/// Clamp the requested look-ahead window.
pub fn clamp_within_days(within_days: Option<i64>) -> i64 {
    within_days
        .unwrap_or(DEFAULT_DUE_WITHIN_DAYS)
        .clamp(0, MAX_DUE_WITHIN_DAYS)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn record_types_validated() {
        assert!(validate_record_type("exam").is_ok());
        assert!(validate_record_type("grooming").is_err());
    }

    #[test]
    fn symptoms_must_be_string_array() {
        assert!(validate_symptoms(&json!(["cough", "lethargy"])).is_ok());
        assert!(validate_symptoms(&json!([])).is_ok());
        assert!(validate_symptoms(&json!("cough")).is_err());
        assert!(validate_symptoms(&json!(["cough", 3])).is_err());
        assert!(validate_symptoms(&json!([" "])).is_err());
    }

    #[test]
    fn due_date_not_before_administered() {
        assert!(validate_vaccination_dates(date(2026, 5, 1), Some(date(2026, 4, 1))).is_err());
        assert!(validate_vaccination_dates(date(2026, 5, 1), Some(date(2027, 5, 1))).is_ok());
        assert!(validate_vaccination_dates(date(2026, 5, 1), None).is_ok());
    }

    #[test]
    fn classify_due_states() {
        let today = date(2026, 6, 1);
        assert_eq!(classify_due(date(2026, 5, 30), today, 30), DueState::Overdue);
        assert_eq!(classify_due(date(2026, 6, 1), today, 30), DueState::DueSoon);
        assert_eq!(classify_due(date(2026, 7, 1), today, 30), DueState::DueSoon);
        assert_eq!(classify_due(date(2026, 7, 2), today, 30), DueState::UpToDate);
    }

    #[test]
    fn within_days_clamped() {
        assert_eq!(clamp_within_days(None), DEFAULT_DUE_WITHIN_DAYS);
        assert_eq!(clamp_within_days(Some(-4)), 0);
        assert_eq!(clamp_within_days(Some(10_000)), MAX_DUE_WITHIN_DAYS);
    }
}
