//! One-shot timestamp stamping on status transitions.
//!
//! Used for `blog_posts.published_at`, `contacts.resolved_at` and
//! `orders.delivered_at`.

use crate::types::Timestamp;

/// Value to store in a "first reached `trigger`" timestamp column.
///
/// Returns `now` when `status` equals `trigger` and nothing has been stamped
/// yet; otherwise returns `current` unchanged. Once set, the timestamp survives
/// later status changes, including toggling away and back.
pub fn stamp_once(
    current: Option<Timestamp>,
    status: &str,
    trigger: &str,
    now: Timestamp,
) -> Option<Timestamp> {
    match current {
        Some(ts) => Some(ts),
        None if status == trigger => Some(now),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    #[test]
    fn stamps_on_trigger() {
        let now = Utc::now();
        assert_eq!(stamp_once(None, "published", "published", now), Some(now));
    }

    #[test]
    fn ignores_other_statuses() {
        let now = Utc::now();
        assert_eq!(stamp_once(None, "draft", "published", now), None);
    }

    #[test]
    fn never_overwrites() {
        let first = Utc::now() - Duration::days(3);
        let now = Utc::now();
        assert_eq!(
            stamp_once(Some(first), "published", "published", now),
            Some(first)
        );
        // Toggled away and back: still the original stamp.
        let after_draft = stamp_once(Some(first), "draft", "published", now);
        assert_eq!(
            stamp_once(after_draft, "published", "published", now),
            Some(first)
        );
    }
}
