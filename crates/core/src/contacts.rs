//! Customer and lead validation, and lead lifecycle constants.

use validator::ValidateEmail;

use crate::error::CoreError;
use crate::validate;

pub const LEAD_STATUS_NEW: &str = "new";
pub const LEAD_STATUS_CONTACTED: &str = "contacted";
pub const LEAD_STATUS_QUALIFIED: &str = "qualified";
pub const LEAD_STATUS_CONVERTED: &str = "converted";
pub const LEAD_STATUS_LOST: &str = "lost";

/// Valid lead status values.
pub const VALID_LEAD_STATUSES: &[&str] = &[
    LEAD_STATUS_NEW,
    LEAD_STATUS_CONTACTED,
    LEAD_STATUS_QUALIFIED,
    LEAD_STATUS_CONVERTED,
    LEAD_STATUS_LOST,
];

pub fn validate_lead_status(status: &str) -> Result<(), CoreError> {
    validate::one_of("status", status, VALID_LEAD_STATUSES)
}

/// Validate an email address. Absent emails are allowed.
pub fn validate_email(email: Option<&str>) -> Result<(), CoreError> {
    match email {
        Some(e) if !e.validate_email() => {
            Err(CoreError::Validation(format!("Invalid email address '{e}'")))
        }
        _ => Ok(()),
    }
}

/// Normalize an email for storage and matching.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate a person's name pair; at least the first name is required.
pub fn validate_names(first_name: &str, last_name: Option<&str>) -> Result<(), CoreError> {
    validate::non_empty("first_name", first_name)?;
    if let Some(last) = last_name {
        if last.len() > 100 {
            return Err(CoreError::Validation(
                "last_name must be at most 100 characters".into(),
            ));
        }
    }
    if first_name.len() > 100 {
        return Err(CoreError::Validation(
            "first_name must be at most 100 characters".into(),
        ));
    }
    Ok(())
}

/// A lead can be converted once. Lost leads can still be converted if they
/// come back.
pub fn ensure_convertible(status: &str) -> Result<(), CoreError> {
    if status == LEAD_STATUS_CONVERTED {
        return Err(CoreError::Conflict(
            "Lead has already been converted to a customer".into(),
        ));
    }
    Ok(())
}
