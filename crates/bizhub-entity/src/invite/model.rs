//! Staff invitation model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

use super::status::InviteStatus;
use crate::staff::{BusinessPermission, BusinessRole};

/// An invitation for an email address to join a business as staff.
///
/// The token is a 64-character hex string carried in the invite link. Role
/// and permissions are snapshotted at creation so the membership produced
/// on acceptance matches what the inviter saw.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Invite {
    /// Unique invite identifier.
    pub id: Uuid,
    /// Business the invitee would join.
    pub business_id: Uuid,
    /// User who issued the invite.
    pub invited_by: Uuid,
    /// Invitee email, stored lowercased.
    pub email: String,
    /// Role the invitee will hold on acceptance.
    pub role: BusinessRole,
    /// Permission snapshot taken at creation.
    pub permissions: Json<Vec<BusinessPermission>>,
    /// Opaque redemption token. Never exposed in listings.
    #[serde(skip_serializing)]
    pub token: String,
    /// Lifecycle state.
    pub status: InviteStatus,
    /// Deadline after which the invite cannot be redeemed.
    pub expires_at: DateTime<Utc>,
    /// When the invite was created.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Invite {
    /// Whether the deadline has passed, regardless of stored status.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Whether the invite can still be redeemed: pending and not past its
    /// deadline.
    pub fn is_redeemable(&self) -> bool {
        self.status == InviteStatus::Pending && !self.is_expired()
    }
}

/// Payload for creating (or replacing a terminal) invite.
#[derive(Debug, Clone)]
pub struct CreateInvite {
    pub business_id: Uuid,
    pub invited_by: Uuid,
    pub email: String,
    pub role: BusinessRole,
    pub permissions: Vec<BusinessPermission>,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn invite(status: InviteStatus, expires_at: DateTime<Utc>) -> Invite {
        Invite {
            id: Uuid::new_v4(),
            business_id: Uuid::new_v4(),
            invited_by: Uuid::new_v4(),
            email: "new.hire@example.com".into(),
            role: BusinessRole::Staff,
            permissions: Json(BusinessRole::Staff.default_permissions()),
            token: "ab".repeat(32),
            status,
            expires_at,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_pending_unexpired_is_redeemable() {
        let i = invite(InviteStatus::Pending, Utc::now() + Duration::days(7));
        assert!(i.is_redeemable());
    }

    #[test]
    fn test_past_deadline_is_not_redeemable() {
        let i = invite(InviteStatus::Pending, Utc::now() - Duration::seconds(1));
        assert!(i.is_expired());
        assert!(!i.is_redeemable());
    }

    #[test]
    fn test_terminal_status_is_not_redeemable() {
        let i = invite(InviteStatus::Accepted, Utc::now() + Duration::days(7));
        assert!(!i.is_redeemable());
    }

    #[test]
    fn test_token_is_never_serialized() {
        let i = invite(InviteStatus::Pending, Utc::now() + Duration::days(7));
        let json = serde_json::to_string(&i).unwrap();
        assert!(!json.contains("token"));
    }
}
