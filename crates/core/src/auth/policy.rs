//! Role-based authorization guards.
//!
//! Authorization is purely claims-based: each guard checks the role
//! claim against a fixed allow-list and fails closed. The matches are
//! exhaustive over the closed `Role` enum so adding a role forces a
//! decision at every guard.

use strafenkasse_shared::{AppError, Role};

/// Allows administrators only.
///
/// # Errors
///
/// Returns `AppError::Forbidden` for every other role.
pub fn require_admin(role: Role) -> Result<(), AppError> {
    match role {
        Role::Admin => Ok(()),
        Role::Spiess | Role::Kassenwart | Role::Vorstand => Err(AppError::Forbidden(
            "Admin-Berechtigung erforderlich".to_string(),
        )),
    }
}

/// Allows administrators and board members.
///
/// # Errors
///
/// Returns `AppError::Forbidden` for every other role.
pub fn require_vorstand(role: Role) -> Result<(), AppError> {
    match role {
        Role::Admin | Role::Vorstand => Ok(()),
        Role::Spiess | Role::Kassenwart => Err(AppError::Forbidden(
            "Vorstand-Berechtigung erforderlich".to_string(),
        )),
    }
}

/// Allows administrators, board members, and the treasurer.
///
/// # Errors
///
/// Returns `AppError::Forbidden` for every other role.
pub fn require_kassenwart(role: Role) -> Result<(), AppError> {
    match role {
        Role::Admin | Role::Vorstand | Role::Kassenwart => Ok(()),
        Role::Spiess => Err(AppError::Forbidden(
            "Kassenwart-Berechtigung erforderlich".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const ALL_ROLES: [Role; 4] = [Role::Spiess, Role::Kassenwart, Role::Vorstand, Role::Admin];

    #[test]
    fn test_require_admin() {
        for role in ALL_ROLES {
            let allowed = require_admin(role).is_ok();
            assert_eq!(allowed, role == Role::Admin);
        }
    }

    #[rstest]
    #[case(Role::Spiess, false)]
    #[case(Role::Kassenwart, false)]
    #[case(Role::Vorstand, true)]
    #[case(Role::Admin, true)]
    fn test_require_vorstand(#[case] role: Role, #[case] allowed: bool) {
        assert_eq!(require_vorstand(role).is_ok(), allowed);
    }

    #[rstest]
    #[case(Role::Spiess, false)]
    #[case(Role::Kassenwart, true)]
    #[case(Role::Vorstand, true)]
    #[case(Role::Admin, true)]
    fn test_require_kassenwart(#[case] role: Role, #[case] allowed: bool) {
        assert_eq!(require_kassenwart(role).is_ok(), allowed);
    }

    #[test]
    fn test_guards_fail_with_forbidden() {
        assert!(matches!(
            require_admin(Role::Spiess),
            Err(AppError::Forbidden(_))
        ));
    }
}
