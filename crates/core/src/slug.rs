//! URL slug derivation for categories, tags and blog posts.
//!
//! The write path calls [`slug_on_create`] / [`slug_on_update`] before
//! persisting, so the stored slug is always either an explicit override or a
//! pure function of the display name.

use crate::error::CoreError;

/// Maximum slug length accepted from clients.
pub const MAX_SLUG_LENGTH: usize = 200;

/// Derive a URL-safe slug from a display name.
///
/// Lowercases, drops every character outside `[a-z0-9-]` and whitespace,
/// turns whitespace and hyphen runs into a single hyphen, and trims
/// leading/trailing hyphens.
pub fn slugify(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for c in input.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !result.is_empty() {
                result.push('-');
            }
            pending_hyphen = false;
            result.push(c);
        } else if c == '-' || c.is_whitespace() {
            pending_hyphen = true;
        }
        // Everything else is dropped without acting as a separator.
    }

    result
}

/// Validate a client-supplied slug (non-empty, lowercase alphanumerics and
/// single inner hyphens only).
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".into()));
    }
    if slug.len() > MAX_SLUG_LENGTH {
        return Err(CoreError::Validation(format!(
            "Slug must be at most {MAX_SLUG_LENGTH} characters"
        )));
    }
    if slug != slugify(slug) {
        return Err(CoreError::Validation(
            "Slug must contain only lowercase alphanumeric characters and single hyphens".into(),
        ));
    }
    Ok(())
}

/// Slug to store when an entity is created.
///
/// An explicit, non-blank slug wins; otherwise the slug is derived from `name`.
pub fn slug_on_create(name: &str, explicit: Option<&str>) -> Result<String, CoreError> {
    match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => {
            validate_slug(slug)?;
            Ok(slug.to_string())
        }
        None => derive_from_name(name),
    }
}

/// Slug to store when an entity is updated, or `None` to leave it untouched.
///
/// - An explicit, non-blank slug in the same write wins.
/// - A name change without an explicit slug re-derives the slug.
/// - A row whose stored slug is empty gets one derived from its current name.
pub fn slug_on_update(
    current_name: &str,
    current_slug: &str,
    new_name: Option<&str>,
    explicit: Option<&str>,
) -> Result<Option<String>, CoreError> {
    if let Some(slug) = explicit.map(str::trim).filter(|s| !s.is_empty()) {
        validate_slug(slug)?;
        return Ok(Some(slug.to_string()));
    }

    if let Some(name) = new_name.filter(|n| *n != current_name) {
        return derive_from_name(name).map(Some);
    }

    if current_slug.is_empty() {
        return derive_from_name(current_name).map(Some);
    }

    Ok(None)
}

fn derive_from_name(name: &str) -> Result<String, CoreError> {
    let slug = slugify(name);
    if slug.is_empty() {
        return Err(CoreError::Validation(format!(
            "Cannot derive a slug from '{name}'; provide an explicit slug"
        )));
    }
    Ok(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic_name() {
        assert_eq!(slugify("Living Room"), "living-room");
    }

    #[test]
    fn slugify_drops_punctuation() {
        assert_eq!(slugify("Oak & Walnut: Tables!"), "oak-walnut-tables");
        assert_eq!(slugify("Mid-Century   Modern"), "mid-century-modern");
    }

    #[test]
    fn slugify_collapses_hyphen_runs() {
        assert_eq!(slugify("a -- b"), "a-b");
        assert_eq!(slugify("a---b"), "a-b");
    }

    #[test]
    fn slugify_trims_edges() {
        assert_eq!(slugify("  -Sofa Beds-  "), "sofa-beds");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn slugify_drops_non_ascii_letters() {
        assert_eq!(slugify("Café Chairs"), "caf-chairs");
    }

    #[test]
    fn slugify_output_alphabet_and_idempotence() {
        let inputs = [
            "Hello, World!",
            "  leading and trailing  ",
            "--x--",
            "Tabs\tand\nnewlines",
            "MiXeD 123 Case",
            "",
            "-",
            "a_b.c/d",
            "Ünïcödé  ünd  Spaces",
        ];
        for input in inputs {
            let slug = slugify(input);
            assert!(
                slug.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "unexpected character in {slug:?}"
            );
            assert!(!slug.starts_with('-') && !slug.ends_with('-'));
            assert!(!slug.contains("--"));
            assert_eq!(slugify(&slug), slug);
        }
    }

    #[test]
    fn validate_slug_accepts_derived_slugs() {
        assert!(validate_slug("dining-tables").is_ok());
        assert!(validate_slug("2024-collection").is_ok());
    }

    #[test]
    fn validate_slug_rejects_bad_input() {
        assert!(validate_slug("").is_err());
        assert!(validate_slug("Upper-Case").is_err());
        assert!(validate_slug("double--hyphen").is_err());
        assert!(validate_slug("-edge").is_err());
        assert!(validate_slug(&"a".repeat(MAX_SLUG_LENGTH + 1)).is_err());
    }

    #[test]
    fn create_derives_when_absent() {
        assert_eq!(slug_on_create("Bed Frames", None).unwrap(), "bed-frames");
        assert_eq!(slug_on_create("Bed Frames", Some("  ")).unwrap(), "bed-frames");
    }

    #[test]
    fn create_keeps_explicit_slug() {
        assert_eq!(slug_on_create("Bed Frames", Some("beds")).unwrap(), "beds");
    }

    #[test]
    fn create_rejects_underivable_name() {
        assert!(slug_on_create("???", None).is_err());
    }

    #[test]
    fn update_rederives_on_name_change() {
        let slug = slug_on_update("Chairs", "chairs", Some("Accent Chairs"), None).unwrap();
        assert_eq!(slug.as_deref(), Some("accent-chairs"));
    }

    #[test]
    fn update_explicit_slug_wins_over_name_change() {
        let slug = slug_on_update("Chairs", "chairs", Some("Accent Chairs"), Some("seating")).unwrap();
        assert_eq!(slug.as_deref(), Some("seating"));
    }

    #[test]
    fn update_same_name_leaves_slug() {
        let slug = slug_on_update("Chairs", "custom-chairs", Some("Chairs"), None).unwrap();
        assert_eq!(slug, None);
        let slug = slug_on_update("Chairs", "custom-chairs", None, None).unwrap();
        assert_eq!(slug, None);
    }

    #[test]
    fn update_fills_missing_slug() {
        let slug = slug_on_update("Outdoor", "", None, None).unwrap();
        assert_eq!(slug.as_deref(), Some("outdoor"));
    }
}
