//! Product and tag status constants.

use crate::error::CoreError;

pub const PRODUCT_STATUS_ACTIVE: &str = "active";
pub const PRODUCT_STATUS_INACTIVE: &str = "inactive";
pub const PRODUCT_STATUS_DRAFT: &str = "draft";
pub const PRODUCT_STATUS_ARCHIVED: &str = "archived";

/// All valid product statuses. Deleting a product archives it.
pub const VALID_PRODUCT_STATUSES: &[&str] = &[
    PRODUCT_STATUS_ACTIVE,
    PRODUCT_STATUS_INACTIVE,
    PRODUCT_STATUS_DRAFT,
    PRODUCT_STATUS_ARCHIVED,
];

pub const TAG_STATUS_ACTIVE: &str = "active";
pub const TAG_STATUS_ARCHIVED: &str = "archived";

/// All valid tag statuses. Deleting a tag archives it.
pub const VALID_TAG_STATUSES: &[&str] = &[TAG_STATUS_ACTIVE, TAG_STATUS_ARCHIVED];

/// Validate that a product status is one of the accepted values.
pub fn validate_product_status(status: &str) -> Result<(), CoreError> {
    if VALID_PRODUCT_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid product status '{status}'. Must be one of: {}",
            VALID_PRODUCT_STATUSES.join(", ")
        )))
    }
}

/// Validate that a tag status is one of the accepted values.
pub fn validate_tag_status(status: &str) -> Result<(), CoreError> {
    if VALID_TAG_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid tag status '{status}'. Must be one of: {}",
            VALID_TAG_STATUSES.join(", ")
        )))
    }
}

/// Validate a hex color in `#RRGGBB` form.
pub fn validate_color(color: &str) -> Result<(), CoreError> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid color '{color}'. Must be in #RRGGBB hex format"
        )))
    }
}
