//! Typed payloads for known job types.

use serde::{Deserialize, Serialize};

/// Queue that notification jobs are placed on.
pub const NOTIFICATION_QUEUE: &str = "notifications";

/// Job type for staff invitation notifications.
pub const STAFF_INVITE_JOB: &str = "staff_invite";

/// Payload for a staff invitation notification job.
///
/// Carries everything the worker needs to render and deliver the invite,
/// so delivery never has to re-read the invite row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffInvitePayload {
    /// Recipient email address.
    pub email: String,
    /// Name of the inviting business.
    pub business_name: String,
    /// Full acceptance link including the token.
    pub invite_link: String,
    /// Role offered, as its lowercase string.
    pub role: String,
    /// Human-readable expiry, e.g. `"2026-09-05 12:00 UTC"`.
    pub expires_at_text: String,
    /// Recipient phone for WhatsApp delivery, when known.
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_round_trips_through_json() {
        let payload = StaffInvitePayload {
            email: "new.hire@example.com".into(),
            business_name: "Acme Bakery".into(),
            invite_link: "http://localhost:3000/invite/accept?token=abc".into(),
            role: "staff".into(),
            expires_at_text: "2026-09-05 12:00 UTC".into(),
            phone: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        let back: StaffInvitePayload = serde_json::from_value(value).unwrap();
        assert_eq!(back.email, payload.email);
        assert_eq!(back.invite_link, payload.invite_link);
    }
}
