//! CMS page slug generation and validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Maximum slug length.
pub const MAX_SLUG_LEN: usize = 120;

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex"));

/// Generate a URL-safe slug from a page title.
///
/// Converts to lowercase, replaces anything that is not ASCII alphanumeric
/// with hyphens, collapses runs of hyphens and trims them from both ends.
pub fn generate_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut prev_hyphen = true;
    for c in title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug.truncate(MAX_SLUG_LEN);
    slug.trim_end_matches('-').to_string()
}

/// Validate an explicit slug.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() || slug.len() > MAX_SLUG_LEN {
        return Err(CoreError::Validation(format!(
            "slug must be between 1 and {MAX_SLUG_LEN} characters"
        )));
    }
    if !SLUG_RE.is_match(slug) {
        return Err(CoreError::Validation(format!(
            "Invalid slug '{slug}'. Use lowercase letters, digits and single hyphens"
        )));
    }
    Ok(())
}

/// Resolve the slug to store: an explicit slug is validated, otherwise one
/// is generated from the title.
pub fn resolve_slug(explicit: Option<&str>, title: &str) -> Result<String, CoreError> {
    let slug = match explicit {
        Some(s) => s.trim().to_string(),
        None => generate_slug(title),
    };
    validate_slug(&slug)?;
    Ok(slug)
}
