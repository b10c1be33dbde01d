//! Litter status constants and gestation arithmetic.

use chrono::Days;

use crate::error::CoreError;
use crate::types::Date;
use crate::validate;

/// Average canine gestation length, counted from the breeding date.
pub const GESTATION_DAYS: i64 = 63;

pub const STATUS_PLANNED: &str = "planned";
pub const STATUS_BRED: &str = "bred";
pub const STATUS_WHELPED: &str = "whelped";
pub const STATUS_AVAILABLE: &str = "available";
pub const STATUS_CLOSED: &str = "closed";

/// Valid litter status values.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_PLANNED,
    STATUS_BRED,
    STATUS_WHELPED,
    STATUS_AVAILABLE,
    STATUS_CLOSED,
];

pub fn validate_status(status: &str) -> Result<(), CoreError> {
    validate::one_of("status", status, VALID_STATUSES)
}

/// Expected whelp date for a breeding date, `None` past the end of the
/// calendar.
pub fn expected_whelp_date(breeding_date: Date) -> Option<Date> {
    breeding_date.checked_add_days(Days::new(GESTATION_DAYS as u64))
}

/// Resolve the expected whelp date to store: an explicit value wins,
/// otherwise it is derived from the breeding date when one is known.
pub fn resolve_expected_whelp_date(
    explicit: Option<Date>,
    breeding_date: Option<Date>,
) -> Option<Date> {
    explicit.or_else(|| breeding_date.and_then(expected_whelp_date))
}

/// Validate the ordering of a litter's dates and its puppy count.
pub fn validate_dates(
    breeding_date: Option<Date>,
    whelp_date: Option<Date>,
    puppy_count: Option<i32>,
) -> Result<(), CoreError> {
    if let (Some(bred), Some(whelped)) = (breeding_date, whelp_date) {
        if whelped < bred {
            return Err(CoreError::Validation(
                "whelp_date cannot be before breeding_date".into(),
            ));
        }
    }
    if let Some(count) = puppy_count {
        if count < 0 {
            return Err(CoreError::Validation(
                "puppy_count must not be negative".into(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn expected_whelp_is_63_days_after_breeding() {
        assert_eq!(expected_whelp_date(date(2026, 1, 1)), Some(date(2026, 3, 5)));
    }

    #[test]
    fn expected_whelp_past_calendar_end_is_none() {
        assert_eq!(expected_whelp_date(Date::MAX), None);
        assert_eq!(resolve_expected_whelp_date(None, Some(Date::MAX)), None);
    }

    #[test]
    fn explicit_expected_date_wins() {
        let explicit = date(2026, 3, 10);
        assert_eq!(
            resolve_expected_whelp_date(Some(explicit), Some(date(2026, 1, 1))),
            Some(explicit)
        );
    }

    #[test]
    fn expected_date_derived_from_breeding() {
        assert_eq!(
            resolve_expected_whelp_date(None, Some(date(2026, 1, 1))),
            Some(date(2026, 3, 5))
        );
        assert_eq!(resolve_expected_whelp_date(None, None), None);
    }

    #[test]
    fn whelp_before_breeding_rejected() {
        assert!(validate_dates(Some(date(2026, 2, 1)), Some(date(2026, 1, 1)), None).is_err());
        assert!(validate_dates(Some(date(2026, 1, 1)), Some(date(2026, 3, 4)), Some(6)).is_ok());
    }

    #[test]
    fn negative_puppy_count_rejected() {
        assert!(validate_dates(None, None, Some(-1)).is_err());
    }

    #[test]
    fn statuses_validated() {
        assert!(validate_status("whelped").is_ok());
        assert!(validate_status("born").is_err());
    }
}
