//! Staff membership model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

use super::permission::BusinessPermission;
use super::role::BusinessRole;

/// A user's standing within a business.
///
/// Permissions are snapshotted at creation from the role registry and do
/// not follow later registry changes. Removal deactivates the row instead
/// of deleting it, so the history of who worked where survives.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StaffMembership {
    /// Unique membership identifier.
    pub id: Uuid,
    /// Business this membership belongs to.
    pub business_id: Uuid,
    /// The member.
    pub user_id: Uuid,
    /// Role held within the business.
    pub role: BusinessRole,
    /// Permission snapshot taken at creation.
    pub permissions: Json<Vec<BusinessPermission>>,
    /// False once the member has been removed.
    pub is_active: bool,
    /// When the membership was created.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl StaffMembership {
    /// Whether this membership grants the given permission.
    ///
    /// Deactivated memberships grant nothing.
    pub fn allows(&self, permission: BusinessPermission) -> bool {
        self.is_active && self.permissions.0.contains(&permission)
    }
}

/// Payload for creating a staff membership.
#[derive(Debug, Clone)]
pub struct CreateStaffMembership {
    pub business_id: Uuid,
    pub user_id: Uuid,
    pub role: BusinessRole,
    pub permissions: Vec<BusinessPermission>,
}

impl CreateStaffMembership {
    /// Build a membership payload with the role's default permission snapshot.
    pub fn with_default_permissions(business_id: Uuid, user_id: Uuid, role: BusinessRole) -> Self {
        Self {
            business_id,
            user_id,
            role,
            permissions: role.default_permissions(),
        }
    }
}

/// Payload for updating a staff membership. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStaffMembership {
    pub role: Option<BusinessRole>,
    pub permissions: Option<Vec<BusinessPermission>>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn membership(active: bool, permissions: Vec<BusinessPermission>) -> StaffMembership {
        StaffMembership {
            id: Uuid::new_v4(),
            business_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            role: BusinessRole::Staff,
            permissions: Json(permissions),
            is_active: active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_allows_checks_snapshot() {
        let m = membership(true, vec![BusinessPermission::BusinessRead]);
        assert!(m.allows(BusinessPermission::BusinessRead));
        assert!(!m.allows(BusinessPermission::StaffInvite));
    }

    #[test]
    fn test_deactivated_membership_grants_nothing() {
        let m = membership(false, BusinessRole::Owner.default_permissions());
        assert!(!m.allows(BusinessPermission::BusinessRead));
    }

    #[test]
    fn test_with_default_permissions_snapshots_role() {
        let p = CreateStaffMembership::with_default_permissions(
            Uuid::new_v4(),
            Uuid::new_v4(),
            BusinessRole::Manager,
        );
        assert_eq!(p.permissions, BusinessRole::Manager.default_permissions());
    }
}
