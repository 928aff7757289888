//! Business permission enforcement.

use bizhub_core::error::AppError;
use bizhub_core::result::AppResult;
use bizhub_entity::staff::model::StaffMembership;
use bizhub_entity::staff::permission::BusinessPermission;

/// Enforces membership permission snapshots.
///
/// Decisions are made against the stored snapshot, never the role
/// registry, so a membership keeps exactly what it was granted.
#[derive(Debug, Clone, Default)]
pub struct PermissionGate;

impl PermissionGate {
    pub fn new() -> Self {
        Self
    }

    /// Whether the membership grants the permission.
    pub fn allows(
        &self,
        membership: Option<&StaffMembership>,
        permission: BusinessPermission,
    ) -> bool {
        membership.is_some_and(|m| m.allows(permission))
    }

    /// Require the permission, mapping a missing or insufficient
    /// membership to an authorization error.
    pub fn require(
        &self,
        membership: Option<&StaffMembership>,
        permission: BusinessPermission,
    ) -> AppResult<()> {
        if self.allows(membership, permission) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Missing required permission: {permission}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizhub_entity::staff::role::BusinessRole;
    use chrono::Utc;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn membership(role: BusinessRole, active: bool) -> StaffMembership {
        StaffMembership {
            id: Uuid::new_v4(),
            business_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            role,
            permissions: Json(role.default_permissions()),
            is_active: active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_manager_can_invite_but_not_remove() {
        let gate = PermissionGate::new();
        let m = membership(BusinessRole::Manager, true);
        assert!(gate.require(Some(&m), BusinessPermission::StaffInvite).is_ok());
        assert!(gate.require(Some(&m), BusinessPermission::StaffRemove).is_err());
    }

    #[test]
    fn test_no_membership_is_forbidden() {
        let gate = PermissionGate::new();
        assert!(gate.require(None, BusinessPermission::BusinessRead).is_err());
    }

    #[test]
    fn test_inactive_membership_is_forbidden() {
        let gate = PermissionGate::new();
        let m = membership(BusinessRole::Owner, false);
        assert!(gate.require(Some(&m), BusinessPermission::BusinessRead).is_err());
    }

    #[test]
    fn test_snapshot_wins_over_role() {
        // A staff member granted extra permissions keeps them.
        let gate = PermissionGate::new();
        let mut m = membership(BusinessRole::Staff, true);
        m.permissions = Json(vec![
            BusinessPermission::BusinessRead,
            BusinessPermission::StaffRead,
        ]);
        assert!(gate.require(Some(&m), BusinessPermission::StaffRead).is_ok());
    }
}
