//! Invite lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a staff invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "invite_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    /// Issued and awaiting acceptance.
    Pending,
    /// Redeemed by the invited user.
    Accepted,
    /// Marked expired after its deadline passed.
    Expired,
}

impl InviteStatus {
    /// Terminal statuses can never transition again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Expired)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for InviteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!InviteStatus::Pending.is_terminal());
        assert!(InviteStatus::Accepted.is_terminal());
        assert!(InviteStatus::Expired.is_terminal());
    }
}
