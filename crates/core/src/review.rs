//! Review status constants and validation functions.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Minimum star rating.
pub const MIN_RATING: i16 = 1;

/// Maximum star rating.
pub const MAX_RATING: i16 = 5;

/// Minimum length of a review comment.
pub const MIN_COMMENT_LENGTH: u64 = 10;

/// Maximum length of a review comment.
pub const MAX_COMMENT_LENGTH: u64 = 2_000;

/// Awaiting moderation. Every new review starts here.
pub const REVIEW_STATUS_PENDING: &str = "pending";

/// Visible on the storefront and counted in the product rating.
pub const REVIEW_STATUS_APPROVED: &str = "approved";

pub const REVIEW_STATUS_REJECTED: &str = "rejected";

pub const REVIEW_STATUS_SPAM: &str = "spam";

/// All valid review statuses.
pub const VALID_REVIEW_STATUSES: &[&str] = &[
    REVIEW_STATUS_PENDING,
    REVIEW_STATUS_APPROVED,
    REVIEW_STATUS_REJECTED,
    REVIEW_STATUS_SPAM,
];

/// Statuses a moderator may assign.
pub const MODERATION_STATUSES: &[&str] = &[
    REVIEW_STATUS_APPROVED,
    REVIEW_STATUS_REJECTED,
    REVIEW_STATUS_SPAM,
];

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate a review status filter value.
pub fn validate_review_status(status: &str) -> Result<(), CoreError> {
    if VALID_REVIEW_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid review status '{status}'. Must be one of: {}",
            VALID_REVIEW_STATUSES.join(", ")
        )))
    }
}

/// Validate the target status of a moderation decision.
pub fn validate_moderation_status(status: &str) -> Result<(), CoreError> {
    if MODERATION_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid moderation status '{status}'. Must be one of: {}",
            MODERATION_STATUSES.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_is_not_a_moderation_outcome() {
        assert!(validate_review_status(REVIEW_STATUS_PENDING).is_ok());
        assert!(validate_moderation_status(REVIEW_STATUS_PENDING).is_err());
    }

    #[test]
    fn moderation_outcomes_accepted() {
        for status in MODERATION_STATUSES {
            assert!(validate_moderation_status(status).is_ok());
        }
    }

    #[test]
    fn unknown_status_rejected() {
        let err = validate_review_status("hidden").unwrap_err();
        assert!(err.to_string().contains("hidden"));
    }
}
