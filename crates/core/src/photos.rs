//! Photo ownership and cover-photo rules.
//!
//! Each dog, litter and puppy has at most one cover photo. The database
//! enforces the "at most" half with a partial unique index; the helpers here
//! decide which photo should hold the flag.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::DbId;
use crate::validate;

pub const ENTITY_DOG: &str = "dog";
pub const ENTITY_LITTER: &str = "litter";
pub const ENTITY_PUPPY: &str = "puppy";

/// Entity types that can own photos.
pub const VALID_ENTITY_TYPES: &[&str] = &[ENTITY_DOG, ENTITY_LITTER, ENTITY_PUPPY];

pub fn validate_entity_type(entity_type: &str) -> Result<(), CoreError> {
    validate::one_of("entity_type", entity_type, VALID_ENTITY_TYPES)
}

/// The ordering-relevant fields of a stored photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoSlot {
    pub id: DbId,
    pub is_cover: bool,
    pub sort_order: i32,
}

/// Whether a newly uploaded photo should become the cover.
///
/// The first photo of an entity always becomes the cover; later uploads only
/// when explicitly requested.
pub fn new_photo_is_cover(existing_photos: i64, requested: Option<bool>) -> bool {
    existing_photos == 0 || requested.unwrap_or(false)
}

/// Sort order for a photo appended after the current maximum. Saturates at
/// `i32::MAX`; ties there are broken by id.
pub fn next_sort_order(current_max: Option<i32>) -> i32 {
    current_max.map_or(0, |m| m.saturating_add(1))
}

/// Choose the photo to promote when the cover photo is removed: the lowest
/// sort order, ties broken by the oldest id.
pub fn pick_successor(remaining: &[PhotoSlot]) -> Option<DbId> {
    remaining
        .iter()
        .min_by_key(|p| (p.sort_order, p.id))
        .map(|p| p.id)
}

/// Return the photo that should be cover after removing `removed` from
/// `photos`, or `None` when no change is needed.
pub fn cover_after_removal(photos: &[PhotoSlot], removed: DbId) -> Option<DbId> {
    let removed_was_cover = photos.iter().any(|p| p.id == removed && p.is_cover);
    let remaining: Vec<PhotoSlot> = photos.iter().copied().filter(|p| p.id != removed).collect();
    if !removed_was_cover || remaining.iter().any(|p| p.is_cover) {
        return None;
    }
    pick_successor(&remaining)
}

/// Check that a reorder request lists every photo of the entity exactly once.
pub fn validate_reorder(existing: &[DbId], requested: &[DbId]) -> Result<(), CoreError> {
    let requested_set: HashSet<DbId> = requested.iter().copied().collect();
    if requested_set.len() != requested.len() {
        return Err(CoreError::Validation(
            "photo_ids must not contain duplicates".into(),
        ));
    }
    let existing_set: HashSet<DbId> = existing.iter().copied().collect();
    if requested_set != existing_set {
        return Err(CoreError::Validation(
            "photo_ids must list every photo of the entity exactly once".into(),
        ));
    }
    Ok(())
}
