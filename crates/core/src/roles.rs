//! Well-known role name constants.
//!
//! These must match the `users.role` CHECK constraint in the initial migration.

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STAFF: &str = "staff";
pub const ROLE_CUSTOMER: &str = "customer";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_STAFF, ROLE_CUSTOMER];

/// Validate that a role name is one of the accepted values.
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        )))
    }
}

/// Whether the role may use the content-management endpoints.
pub fn is_staff(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_STAFF
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_validate() {
        for role in VALID_ROLES {
            assert!(validate_role(role).is_ok());
        }
    }

    #[test]
    fn unknown_role_rejected() {
        assert!(validate_role("superuser").is_err());
    }

    #[test]
    fn staff_check() {
        assert!(is_staff(ROLE_ADMIN));
        assert!(is_staff(ROLE_STAFF));
        assert!(!is_staff(ROLE_CUSTOMER));
    }
}
