//! Blog post status constants and read-time estimation.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

pub const BLOG_STATUS_DRAFT: &str = "draft";
pub const BLOG_STATUS_PUBLISHED: &str = "published";
pub const BLOG_STATUS_ARCHIVED: &str = "archived";

/// All valid blog post statuses.
pub const VALID_BLOG_STATUSES: &[&str] =
    &[BLOG_STATUS_DRAFT, BLOG_STATUS_PUBLISHED, BLOG_STATUS_ARCHIVED];

/// Reading speed used for the read-time estimate.
pub const WORDS_PER_MINUTE: usize = 200;

/* --------------------------------------------------------------------------
Validation
-------------------------------------------------------------------------- */

/// Validate that a blog status string is one of the accepted values.
pub fn validate_blog_status(status: &str) -> Result<(), CoreError> {
    if VALID_BLOG_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid blog status '{status}'. Must be one of: {}",
            VALID_BLOG_STATUSES.join(", ")
        )))
    }
}

/* --------------------------------------------------------------------------
Read time
-------------------------------------------------------------------------- */

/// Number of whitespace-separated words in `content`.
pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Estimated minutes to read `content`: `ceil(words / 200)`.
pub fn estimate_read_time(content: &str) -> i32 {
    let minutes = word_count(content).div_ceil(WORDS_PER_MINUTE);
    i32::try_from(minutes).unwrap_or(i32::MAX)
}

/// Read time to store for a new post. An explicit value is kept as-is.
pub fn read_time_on_create(content: &str, explicit: Option<i32>) -> i32 {
    explicit.unwrap_or_else(|| estimate_read_time(content))
}

/// Read time to store on update, or `None` when the content did not change.
pub fn read_time_on_update(current_content: &str, new_content: Option<&str>) -> Option<i32> {
    new_content
        .filter(|c| *c != current_content)
        .map(estimate_read_time)
}
