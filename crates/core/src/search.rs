//! Cross-entity search helpers.
//!
//! Search is a case-insensitive substring match (`ILIKE`) over a handful of
//! text columns per entity; the helpers here build safe patterns and parse
//! the requested entity types.

use crate::error::CoreError;

/// Default number of search results per entity type.
pub const DEFAULT_SEARCH_LIMIT: i64 = 20;

/// Maximum number of search results per entity type.
pub const MAX_SEARCH_LIMIT: i64 = 100;

/// Queries shorter than this (after trimming) return no results.
pub const MIN_QUERY_CHARS: usize = 2;

pub const SEARCH_DOGS: &str = "dog";
pub const SEARCH_LITTERS: &str = "litter";
pub const SEARCH_PUPPIES: &str = "puppy";
pub const SEARCH_CUSTOMERS: &str = "customer";
pub const SEARCH_LEADS: &str = "lead";

/// Valid entity types for unified search.
pub const SEARCHABLE_ENTITY_TYPES: &[&str] = &[
    SEARCH_DOGS,
    SEARCH_LITTERS,
    SEARCH_PUPPIES,
    SEARCH_CUSTOMERS,
    SEARCH_LEADS,
];

/// Escape `LIKE` metacharacters and wrap the term for a substring match.
///
/// Returns `None` when the trimmed query is too short to search.
pub fn like_pattern(query: &str) -> Option<String> {
    let term = query.trim();
    if term.chars().count() < MIN_QUERY_CHARS {
        return None;
    }
    Some(wrap_escaped(term))
}

/// Substring pattern for list filters (`?q=`). Any non-blank term qualifies.
pub fn filter_pattern(query: Option<&str>) -> Option<String> {
    query
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(wrap_escaped)
}

fn wrap_escaped(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Parse a comma-separated `types` parameter. `None` or blank means all types.
pub fn parse_entity_types(types: Option<&str>) -> Result<Vec<&'static str>, CoreError> {
    let Some(raw) = types.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(SEARCHABLE_ENTITY_TYPES.to_vec());
    };

    let mut parsed = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let known = SEARCHABLE_ENTITY_TYPES
            .iter()
            .find(|t| **t == part)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown search type '{part}'. Must be one of: {}",
                    SEARCHABLE_ENTITY_TYPES.join(", ")
                ))
            })?;
        if !parsed.contains(known) {
            parsed.push(*known);
        }
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_wraps_term() {
        assert_eq!(like_pattern(" bella "), Some("%bella%".to_string()));
    }

    #[test]
    fn pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("50%_off"), Some("%50\\%\\_off%".to_string()));
        assert_eq!(like_pattern("a\\b"), Some("%a\\\\b%".to_string()));
    }

    #[test]
    fn short_queries_yield_none() {
        assert_eq!(like_pattern("a"), None);
        assert_eq!(like_pattern("   "), None);
    }

    #[test]
    fn filter_pattern_accepts_single_character() {
        assert_eq!(filter_pattern(Some("b")), Some("%b%".to_string()));
        assert_eq!(filter_pattern(Some("  ")), None);
        assert_eq!(filter_pattern(None), None);
    }

    #[test]
    fn types_default_to_all() {
        assert_eq!(parse_entity_types(None).unwrap(), SEARCHABLE_ENTITY_TYPES);
        assert_eq!(parse_entity_types(Some(" ")).unwrap(), SEARCHABLE_ENTITY_TYPES);
    }

    #[test]
    fn types_parsed_and_deduplicated() {
        assert_eq!(
            parse_entity_types(Some("dog, puppy,dog")).unwrap(),
            vec!["dog", "puppy"]
        );
    }

    #[test]
    fn unknown_type_rejected() {
        assert!(parse_entity_types(Some("dog,cat")).is_err());
    }
}
