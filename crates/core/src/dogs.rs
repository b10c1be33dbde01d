//! Dog constants and validation.

use crate::error::CoreError;
use crate::types::DbId;
use crate::validate;

pub const GENDER_MALE: &str = "male";
pub const GENDER_FEMALE: &str = "female";

/// Valid gender values for dogs and puppies.
pub const VALID_GENDERS: &[&str] = &[GENDER_MALE, GENDER_FEMALE];

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_RETIRED: &str = "retired";
pub const STATUS_SOLD: &str = "sold";
pub const STATUS_DECEASED: &str = "deceased";

/// Valid dog status values.
pub const VALID_STATUSES: &[&str] = &[STATUS_ACTIVE, STATUS_RETIRED, STATUS_SOLD, STATUS_DECEASED];

pub fn validate_gender(gender: &str) -> Result<(), CoreError> {
    validate::one_of("gender", gender, VALID_GENDERS)
}

pub fn validate_status(status: &str) -> Result<(), CoreError> {
    validate::one_of("status", status, VALID_STATUSES)
}

/// Validate a dog's weight. Zero or negative weights are data-entry mistakes.
pub fn validate_weight(weight_lbs: Option<f64>) -> Result<(), CoreError> {
    match weight_lbs {
        Some(w) if !(w > 0.0) => Err(CoreError::Validation(
            "weight_lbs must be greater than zero".into(),
        )),
        _ => Ok(()),
    }
}

/// A dog cannot be recorded as its own dam or sire, nor have the same dog
/// as both parents.
pub fn validate_parent_ids(
    dog_id: Option<DbId>,
    dam_id: Option<DbId>,
    sire_id: Option<DbId>,
) -> Result<(), CoreError> {
    if let Some(id) = dog_id {
        if dam_id == Some(id) || sire_id == Some(id) {
            return Err(CoreError::Validation(
                "A dog cannot be its own parent".into(),
            ));
        }
    }
    if dam_id.is_some() && dam_id == sire_id {
        return Err(CoreError::Validation(
            "dam_id and sire_id must refer to different dogs".into(),
        ));
    }
    Ok(())
}

/// Check that a dog used as a dam is female and one used as a sire is male.
pub fn validate_parent_gender(role: &str, gender: &str) -> Result<(), CoreError> {
    let expected = match role {
        "dam" => GENDER_FEMALE,
        "sire" => GENDER_MALE,
        other => {
            return Err(CoreError::Internal(format!("Unknown parent role '{other}'")));
        }
    };
    if gender == expected {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "The {role} must be {expected}, got {gender}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_genders_accepted() {
        assert!(validate_gender("male").is_ok());
        assert!(validate_gender("female").is_ok());
        assert!(validate_gender("unknown").is_err());
    }

    #[test]
    fn valid_statuses_accepted() {
        for s in VALID_STATUSES {
            assert!(validate_status(s).is_ok());
        }
        assert!(validate_status("lost").is_err());
    }

    #[test]
    fn weight_must_be_positive() {
        assert!(validate_weight(Some(0.0)).is_err());
        assert!(validate_weight(Some(-2.5)).is_err());
        assert!(validate_weight(Some(f64::NAN)).is_err());
        assert!(validate_weight(Some(54.2)).is_ok());
        assert!(validate_weight(None).is_ok());
    }

    #[test]
    fn dog_cannot_be_own_parent() {
        assert!(validate_parent_ids(Some(5), Some(5), None).is_err());
        assert!(validate_parent_ids(Some(5), None, Some(5)).is_err());
        assert!(validate_parent_ids(Some(5), Some(1), Some(2)).is_ok());
    }

    #[test]
    fn dam_and_sire_must_differ() {
        assert!(validate_parent_ids(None, Some(3), Some(3)).is_err());
        assert!(validate_parent_ids(None, None, None).is_ok());
    }

    #[test]
    fn parent_gender_checked() {
        assert!(validate_parent_gender("dam", "female").is_ok());
        assert!(validate_parent_gender("dam", "male").is_err());
        assert!(validate_parent_gender("sire", "male").is_ok());
        assert!(validate_parent_gender("sire", "female").is_err());
    }
}
