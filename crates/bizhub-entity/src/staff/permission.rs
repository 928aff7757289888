//! Business permission definitions.

use serde::{Deserialize, Serialize};

/// Permissions that can be granted within a business.
///
/// The set is closed; the permission gate checks membership permission
/// sets against these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BusinessPermission {
    /// View business details.
    #[serde(rename = "business:read")]
    BusinessRead,
    /// Update business details.
    #[serde(rename = "business:update")]
    BusinessUpdate,
    /// Delete the business.
    #[serde(rename = "business:delete")]
    BusinessDelete,
    /// View staff memberships.
    #[serde(rename = "staff:read")]
    StaffRead,
    /// Invite or directly add staff.
    #[serde(rename = "staff:invite")]
    StaffInvite,
    /// Update staff role, permissions, or active flag.
    #[serde(rename = "staff:update")]
    StaffUpdate,
    /// Remove (deactivate) staff.
    #[serde(rename = "staff:remove")]
    StaffRemove,
}

impl BusinessPermission {
    /// Return the permission as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BusinessRead => "business:read",
            Self::BusinessUpdate => "business:update",
            Self::BusinessDelete => "business:delete",
            Self::StaffRead => "staff:read",
            Self::StaffInvite => "staff:invite",
            Self::StaffUpdate => "staff:update",
            Self::StaffRemove => "staff:remove",
        }
    }
}

impl std::fmt::Display for BusinessPermission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BusinessPermission {
    type Err = bizhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "business:read" => Ok(Self::BusinessRead),
            "business:update" => Ok(Self::BusinessUpdate),
            "business:delete" => Ok(Self::BusinessDelete),
            "staff:read" => Ok(Self::StaffRead),
            "staff:invite" => Ok(Self::StaffInvite),
            "staff:update" => Ok(Self::StaffUpdate),
            "staff:remove" => Ok(Self::StaffRemove),
            _ => Err(bizhub_core::AppError::validation(format!(
                "Invalid business permission: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_round_trip() {
        let json = serde_json::to_string(&BusinessPermission::StaffInvite).unwrap();
        assert_eq!(json, "\"staff:invite\"");
        let back: BusinessPermission = serde_json::from_str(&json).unwrap();
        assert_eq!(back, BusinessPermission::StaffInvite);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("staff:promote".parse::<BusinessPermission>().is_err());
    }
}
