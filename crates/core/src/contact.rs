//! Contact submission status constants.

use crate::error::CoreError;

pub const CONTACT_STATUS_NEW: &str = "new";
pub const CONTACT_STATUS_IN_PROGRESS: &str = "in_progress";

/// Reaching this status stamps `resolved_at` (once).
pub const CONTACT_STATUS_RESOLVED: &str = "resolved";

pub const CONTACT_STATUS_CLOSED: &str = "closed";

/// All valid contact statuses.
pub const VALID_CONTACT_STATUSES: &[&str] = &[
    CONTACT_STATUS_NEW,
    CONTACT_STATUS_IN_PROGRESS,
    CONTACT_STATUS_RESOLVED,
    CONTACT_STATUS_CLOSED,
];

/// Validate that a contact status is one of the accepted values.
pub fn validate_contact_status(status: &str) -> Result<(), CoreError> {
    if VALID_CONTACT_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid contact status '{status}'. Must be one of: {}",
            VALID_CONTACT_STATUSES.join(", ")
        )))
    }
}
