//! Message direction constants and validation.

use crate::error::CoreError;
use crate::validate;

pub const DIRECTION_INBOUND: &str = "inbound";
pub const DIRECTION_OUTBOUND: &str = "outbound";

/// Valid message directions.
pub const VALID_DIRECTIONS: &[&str] = &[DIRECTION_INBOUND, DIRECTION_OUTBOUND];

/// Maximum characters shown in a conversation preview.
pub const PREVIEW_CHARS: usize = 120;

pub fn validate_direction(direction: &str) -> Result<(), CoreError> {
    validate::one_of("direction", direction, VALID_DIRECTIONS)
}

/// Media attachments are stored as a JSON array of URL strings.
pub fn validate_media_urls(media_urls: &serde_json::Value) -> Result<(), CoreError> {
    let ok = media_urls
        .as_array()
        .is_some_and(|items| items.iter().all(|u| u.as_str().is_some_and(|s| !s.trim().is_empty())));
    if ok {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "media_urls must be an array of non-empty strings".into(),
        ))
    }
}

/// Truncate a message body for conversation listings, on a char boundary.
pub fn preview(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= PREVIEW_CHARS {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(PREVIEW_CHARS).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn directions_validated() {
        assert!(validate_direction("inbound").is_ok());
        assert!(validate_direction("sideways").is_err());
    }

    #[test]
    fn media_urls_must_be_strings() {
        assert!(validate_media_urls(&json!([])).is_ok());
        assert!(validate_media_urls(&json!(["/uploads/a.jpg"])).is_ok());
        assert!(validate_media_urls(&json!([1])).is_err());
        assert!(validate_media_urls(&json!({"a": 1})).is_err());
    }

    #[test]
    fn preview_truncates_long_bodies() {
        let body = "é".repeat(200);
        let p = preview(&body);
        assert_eq!(p.chars().count(), PREVIEW_CHARS + 1);
        assert!(p.ends_with('…'));
    }

    #[test]
    fn preview_keeps_short_bodies() {
        assert_eq!(preview("  Hello there  "), "Hello there");
    }
}
