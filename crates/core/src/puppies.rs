//! Puppy status constants and validation.

use crate::error::CoreError;
use crate::types::DbId;
use crate::validate;

pub const STATUS_AVAILABLE: &str = "available";
pub const STATUS_RESERVED: &str = "reserved";
pub const STATUS_SOLD: &str = "sold";
pub const STATUS_KEPT: &str = "kept";

/// Valid puppy status values.
pub const VALID_STATUSES: &[&str] = &[STATUS_AVAILABLE, STATUS_RESERVED, STATUS_SOLD, STATUS_KEPT];

pub fn validate_status(status: &str) -> Result<(), CoreError> {
    validate::one_of("status", status, VALID_STATUSES)
}

/// Reserved and sold puppies must be attached to a customer.
pub fn validate_customer_for_status(
    status: &str,
    customer_id: Option<DbId>,
) -> Result<(), CoreError> {
    if (status == STATUS_RESERVED || status == STATUS_SOLD) && customer_id.is_none() {
        return Err(CoreError::Validation(format!(
            "A {status} puppy requires a customer_id"
        )));
    }
    Ok(())
}

/// Validate a birth weight in ounces.
pub fn validate_birth_weight(birth_weight_oz: Option<f64>) -> Result<(), CoreError> {
    match birth_weight_oz {
        Some(w) if !(w > 0.0) => Err(CoreError::Validation(
            "birth_weight_oz must be greater than zero".into(),
        )),
        _ => Ok(()),
    }
}
