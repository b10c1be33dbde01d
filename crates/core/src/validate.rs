//! Small field validators shared by the resource modules.

use crate::error::CoreError;

/// Ensure `value` is one of `allowed`, naming `field` in the error.
pub fn one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), CoreError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {field} '{value}'. Must be one of: {}",
            allowed.join(", ")
        )))
    }
}

/// Ensure a required text field is not blank.
pub fn non_empty(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        Err(CoreError::Validation(format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}

/// Ensure a monetary amount in cents is not negative.
pub fn non_negative_cents(field: &str, value: Option<i64>) -> Result<(), CoreError> {
    match value {
        Some(v) if v < 0 => Err(CoreError::Validation(format!(
            "{field} must not be negative"
        ))),
        _ => Ok(()),
    }
}

/// Ensure exactly one of two optional owner references is set.
///
/// Used for rows that belong to either a dog or a puppy (health records,
/// vaccinations) or to either a customer or a lead (messages).
pub fn exactly_one<T>(
    first_name: &str,
    first: Option<T>,
    second_name: &str,
    second: Option<T>,
) -> Result<(), CoreError> {
    match (first.is_some(), second.is_some()) {
        (true, false) | (false, true) => Ok(()),
        _ => Err(CoreError::Validation(format!(
            "Exactly one of {first_name} or {second_name} must be provided"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_of_accepts_listed_value() {
        assert!(one_of("gender", "male", &["male", "female"]).is_ok());
    }

    #[test]
    fn one_of_rejects_unlisted_value() {
        let err = one_of("gender", "other", &["male", "female"]).unwrap_err();
        assert!(err.to_string().contains("Invalid gender 'other'"));
    }

    #[test]
    fn non_empty_rejects_whitespace() {
        assert!(non_empty("name", "   ").is_err());
        assert!(non_empty("name", "Rex").is_ok());
    }

    #[test]
    fn negative_cents_rejected() {
        assert!(non_negative_cents("price_cents", Some(-1)).is_err());
        assert!(non_negative_cents("price_cents", Some(0)).is_ok());
        assert!(non_negative_cents("price_cents", None).is_ok());
    }

    #[test]
    fn exactly_one_requires_a_single_owner() {
        assert!(exactly_one("dog_id", Some(1), "puppy_id", None).is_ok());
        assert!(exactly_one("dog_id", None, "puppy_id", Some(2)).is_ok());
        assert!(exactly_one::<i64>("dog_id", None, "puppy_id", None).is_err());
        assert!(exactly_one("dog_id", Some(1), "puppy_id", Some(2)).is_err());
    }
}
