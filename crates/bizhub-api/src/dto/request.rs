//! Request DTOs with validation rules.

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use bizhub_entity::invite::status::InviteStatus;
use bizhub_entity::staff::{BusinessPermission, BusinessRole};

/// POST /api/v1/auth/register
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
}

/// POST /api/v1/auth/login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// PUT /api/v1/auth/profile
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
}

/// POST /api/v1/businesses
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBusinessRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub industry: String,
    #[validate(length(min = 1, max = 32))]
    pub phone_number: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
}

/// PUT /api/v1/businesses/{id}
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBusinessRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub industry: Option<String>,
    #[validate(length(min = 1, max = 32))]
    pub phone_number: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
}

/// POST /api/v1/businesses/{id}/invites
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InviteStaffRequest {
    #[validate(email)]
    pub email: String,
    pub role: BusinessRole,
}

/// POST /api/v1/businesses/{id}/staff
#[derive(Debug, Clone, Deserialize)]
pub struct AddStaffRequest {
    pub user_id: Uuid,
    pub role: BusinessRole,
}

/// PUT /api/v1/businesses/{id}/staff/{staff_id}
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStaffRequest {
    pub role: Option<BusinessRole>,
    pub permissions: Option<Vec<BusinessPermission>>,
    pub is_active: Option<bool>,
}

/// POST /api/v1/invites/accept
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AcceptInviteRequest {
    #[validate(length(equal = 64))]
    pub token: String,
}

/// GET /api/v1/invites/validate?token=...
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateInviteQuery {
    pub token: String,
}

/// GET /api/v1/businesses/{id}/invites?status=...
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListInvitesQuery {
    pub status: Option<InviteStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_rejects_short_password() {
        let req = RegisterRequest {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            password: "short".into(),
            phone: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_invite_rejects_bad_email() {
        let req = InviteStaffRequest {
            email: "not-an-email".into(),
            role: BusinessRole::Staff,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_accept_requires_full_token() {
        let req = AcceptInviteRequest {
            token: "abc".into(),
        };
        assert!(req.validate().is_err());

        let req = AcceptInviteRequest {
            token: "ab".repeat(32),
        };
        assert!(req.validate().is_ok());
    }
}
