//! Business role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::permission::BusinessPermission;

/// Roles a user can hold within a business.
///
/// The set is closed: owner > manager > staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "business_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BusinessRole {
    /// The business owner. Holds every permission.
    Owner,
    /// Can manage the business and invite staff, but not remove them.
    Manager,
    /// Read-only standing within the business.
    Staff,
}

impl BusinessRole {
    /// The static role→permission registry.
    ///
    /// Returns the permission set a role grants at membership or invite
    /// creation time. The result is a snapshot: stored permission sets do
    /// not change when this table does.
    pub fn default_permissions(&self) -> Vec<BusinessPermission> {
        use BusinessPermission::*;
        match self {
            Self::Owner => vec![
                BusinessRead,
                BusinessUpdate,
                BusinessDelete,
                StaffRead,
                StaffInvite,
                StaffUpdate,
                StaffRemove,
            ],
            Self::Manager => vec![BusinessRead, BusinessUpdate, StaffRead, StaffInvite],
            Self::Staff => vec![BusinessRead],
        }
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Manager => "manager",
            Self::Staff => "staff",
        }
    }
}

impl fmt::Display for BusinessRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BusinessRole {
    type Err = bizhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "manager" => Ok(Self::Manager),
            "staff" => Ok(Self::Staff),
            _ => Err(bizhub_core::AppError::validation(format!(
                "Invalid business role: '{s}'. Expected one of: owner, manager, staff"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_matches_fixed_table() {
        assert_eq!(BusinessRole::Owner.default_permissions().len(), 7);
        assert_eq!(
            BusinessRole::Manager.default_permissions(),
            vec![
                BusinessPermission::BusinessRead,
                BusinessPermission::BusinessUpdate,
                BusinessPermission::StaffRead,
                BusinessPermission::StaffInvite,
            ]
        );
        assert_eq!(
            BusinessRole::Staff.default_permissions(),
            vec![BusinessPermission::BusinessRead]
        );
    }

    #[test]
    fn test_registry_is_deterministic() {
        assert_eq!(
            BusinessRole::Manager.default_permissions(),
            BusinessRole::Manager.default_permissions()
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!("owner".parse::<BusinessRole>().unwrap(), BusinessRole::Owner);
        assert_eq!("MANAGER".parse::<BusinessRole>().unwrap(), BusinessRole::Manager);
        assert!("admin".parse::<BusinessRole>().is_err());
    }
}
