//! Contract types and the contract status machine.
//!
//! ```text
//! draft ──send──▶ sent ──sign──▶ signed
//!   │               │
//!   └────cancel─────┴──▶ cancelled
//! ```

use crate::error::CoreError;
use crate::validate;

pub const TYPE_SALE: &str = "sale";
pub const TYPE_CO_OWNERSHIP: &str = "co_ownership";
pub const TYPE_STUD: &str = "stud";
pub const TYPE_GUARDIAN: &str = "guardian";

/// Valid contract types.
pub const VALID_TYPES: &[&str] = &[TYPE_SALE, TYPE_CO_OWNERSHIP, TYPE_STUD, TYPE_GUARDIAN];

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_SENT: &str = "sent";
pub const STATUS_SIGNED: &str = "signed";
pub const STATUS_CANCELLED: &str = "cancelled";

/// Valid contract statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_DRAFT, STATUS_SENT, STATUS_SIGNED, STATUS_CANCELLED];

pub fn validate_contract_type(contract_type: &str) -> Result<(), CoreError> {
    validate::one_of("contract_type", contract_type, VALID_TYPES)
}

/// Whether a contract may move from `from` to `to`.
pub fn can_transition(from: &str, to: &str) -> bool {
    matches!(
        (from, to),
        (STATUS_DRAFT, STATUS_SENT)
            | (STATUS_SENT, STATUS_SIGNED)
            | (STATUS_DRAFT, STATUS_CANCELLED)
            | (STATUS_SENT, STATUS_CANCELLED)
    )
}

/// Validate a status transition, returning a conflict for illegal moves.
pub fn validate_transition(from: &str, to: &str) -> Result<(), CoreError> {
    validate::one_of("status", to, VALID_STATUSES)?;
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Cannot move contract from '{from}' to '{to}'"
        )))
    }
}

/// Only draft contracts may have their terms edited.
pub fn ensure_editable(status: &str) -> Result<(), CoreError> {
    if status == STATUS_DRAFT {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Contract is '{status}'; only draft contracts can be edited"
        )))
    }
}

/// The deposit cannot exceed the price.
pub fn validate_amounts(price_cents: Option<i64>, deposit_cents: Option<i64>) -> Result<(), CoreError> {
    validate::non_negative_cents("price_cents", price_cents)?;
    validate::non_negative_cents("deposit_cents", deposit_cents)?;
    if let (Some(price), Some(deposit)) = (price_cents, deposit_cents) {
        if deposit > price {
            return Err(CoreError::Validation(
                "deposit_cents cannot exceed price_cents".into(),
            ));
        }
    }
    Ok(())
}
