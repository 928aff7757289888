//! Invite lifecycle: create, list, resend, cancel, validate, accept.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::info;
use uuid::Uuid;

use bizhub_auth::gate::PermissionGate;
use bizhub_core::error::AppError;
use bizhub_database::repositories::business::BusinessRepository;
use bizhub_database::repositories::invite::InviteRepository;
use bizhub_database::repositories::job::JobRepository;
use bizhub_database::repositories::staff::StaffRepository;
use bizhub_database::repositories::user::UserRepository;
use bizhub_entity::invite::model::{CreateInvite, Invite};
use bizhub_entity::invite::status::InviteStatus;
use bizhub_entity::job::model::CreateJob;
use bizhub_entity::job::payload::{NOTIFICATION_QUEUE, STAFF_INVITE_JOB, StaffInvitePayload};
use bizhub_entity::job::status::JobPriority;
use bizhub_entity::staff::model::{CreateStaffMembership, StaffMembership};
use bizhub_entity::staff::{BusinessPermission, BusinessRole};

use super::token::TokenGenerator;
use crate::context::RequestContext;

/// How long an invite stays redeemable.
const INVITE_TTL_DAYS: i64 = 7;

/// Manages the staff invitation lifecycle and enqueues delivery jobs.
#[derive(Debug, Clone)]
pub struct InviteService {
    /// Invite repository.
    invite_repo: Arc<InviteRepository>,
    /// Staff repository for membership checks.
    staff_repo: Arc<StaffRepository>,
    /// Business repository for names in invite links.
    business_repo: Arc<BusinessRepository>,
    /// User repository for email matching and phone lookups.
    user_repo: Arc<UserRepository>,
    /// Job repository for enqueueing notification jobs.
    job_repo: Arc<JobRepository>,
    /// Token generator.
    tokens: TokenGenerator,
    /// Permission gate.
    permissions: PermissionGate,
    /// Base URL the acceptance link points at.
    frontend_url: String,
    /// Delivery attempts per notification job.
    max_attempts: i32,
}

/// Request to invite an email address to a business.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CreateInviteRequest {
    pub email: String,
    pub role: BusinessRole,
}

/// Outcome of a token lookup for the public acceptance page.
///
/// A pending invite past its deadline reads as expired even though the
/// stored status still says pending.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ValidatedInvite {
    Accepted,
    Expired,
    Pending {
        business_name: String,
        email: String,
        role: BusinessRole,
        expires_at: DateTime<Utc>,
    },
}

impl InviteService {
    /// Creates a new invite service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        invite_repo: Arc<InviteRepository>,
        staff_repo: Arc<StaffRepository>,
        business_repo: Arc<BusinessRepository>,
        user_repo: Arc<UserRepository>,
        job_repo: Arc<JobRepository>,
        frontend_url: String,
        max_attempts: i32,
    ) -> Self {
        Self {
            invite_repo,
            staff_repo,
            business_repo,
            user_repo,
            job_repo,
            tokens: TokenGenerator::new(),
            permissions: PermissionGate::new(),
            frontend_url,
            max_attempts,
        }
    }

    /// Invites an email address to join a business.
    ///
    /// A pending invite for the same address conflicts; a terminal one is
    /// replaced in place with a fresh token and expiry. Role and
    /// permissions are snapshotted at this point.
    pub async fn create_invite(
        &self,
        ctx: &RequestContext,
        business_id: Uuid,
        req: CreateInviteRequest,
    ) -> Result<Invite, AppError> {
        let membership = self
            .staff_repo
            .find_membership(business_id, ctx.user_id)
            .await?;
        self.permissions
            .require(membership.as_ref(), BusinessPermission::StaffInvite)?;

        if req.role == BusinessRole::Owner {
            return Err(AppError::validation("Cannot invite someone as owner"));
        }

        let business = self
            .business_repo
            .find_by_id(business_id)
            .await?
            .ok_or_else(|| AppError::not_found("Business not found"))?;

        let email = req.email.trim().to_lowercase();

        // An existing active member never gets an invite.
        if let Some(user) = self.user_repo.find_by_email(&email).await? {
            let existing = self.staff_repo.find_membership(business_id, user.id).await?;
            if existing.is_some_and(|m| m.is_active) {
                return Err(AppError::conflict(
                    "User is already a member of this business",
                ));
            }
        }

        let data = CreateInvite {
            business_id,
            invited_by: ctx.user_id,
            email: email.clone(),
            role: req.role,
            permissions: req.role.default_permissions(),
            token: self.tokens.generate_token(),
            expires_at: Utc::now() + Duration::days(INVITE_TTL_DAYS),
        };

        let invite = match self.invite_repo.find_by_business_and_email(business_id, &email).await? {
            None => self.invite_repo.create(&data).await?,
            Some(existing) if existing.status == InviteStatus::Pending => {
                // A pending invite that silently aged out can be replaced.
                if existing.is_expired() {
                    self.invite_repo
                        .set_status(existing.id, InviteStatus::Expired)
                        .await?;
                    self.invite_repo.replace_terminal(existing.id, &data).await?
                } else {
                    return Err(AppError::conflict(
                        "An invite for this email already exists",
                    ));
                }
            }
            Some(existing) => self.invite_repo.replace_terminal(existing.id, &data).await?,
        };

        self.enqueue_delivery(ctx, &invite, &business.name).await?;

        info!(invite_id = %invite.id, business_id = %business_id, "Invite created");
        Ok(invite)
    }

    /// Lists the invites of a business, optionally filtered by status.
    pub async fn list_invites(
        &self,
        ctx: &RequestContext,
        business_id: Uuid,
        status: Option<InviteStatus>,
    ) -> Result<Vec<Invite>, AppError> {
        let membership = self
            .staff_repo
            .find_membership(business_id, ctx.user_id)
            .await?;
        self.permissions
            .require(membership.as_ref(), BusinessPermission::StaffRead)?;

        self.invite_repo.list_for_business(business_id, status).await
    }

    /// Re-enqueues the delivery of a pending invite with its existing token.
    pub async fn resend_invite(
        &self,
        ctx: &RequestContext,
        business_id: Uuid,
        invite_id: Uuid,
    ) -> Result<(), AppError> {
        let membership = self
            .staff_repo
            .find_membership(business_id, ctx.user_id)
            .await?;
        self.permissions
            .require(membership.as_ref(), BusinessPermission::StaffInvite)?;

        let invite = self
            .invite_repo
            .find_by_id(invite_id)
            .await?
            .filter(|i| i.business_id == business_id)
            .ok_or_else(|| AppError::not_found("Invite not found"))?;

        if !invite.is_redeemable() {
            return Err(AppError::conflict("Only pending invites can be resent"));
        }

        let business = self
            .business_repo
            .find_by_id(business_id)
            .await?
            .ok_or_else(|| AppError::not_found("Business not found"))?;

        self.enqueue_delivery(ctx, &invite, &business.name).await?;
        info!(invite_id = %invite.id, "Invite resent");
        Ok(())
    }

    /// Cancels a pending invite, making its token unusable.
    ///
    /// Cancelling an invite that is no longer pending reads as a
    /// not-found, so the no-op is visible to the caller.
    pub async fn cancel_invite(
        &self,
        ctx: &RequestContext,
        business_id: Uuid,
        invite_id: Uuid,
    ) -> Result<(), AppError> {
        let membership = self
            .staff_repo
            .find_membership(business_id, ctx.user_id)
            .await?;
        self.permissions
            .require(membership.as_ref(), BusinessPermission::StaffInvite)?;

        let invite = self
            .invite_repo
            .find_by_id(invite_id)
            .await?
            .filter(|i| i.business_id == business_id && i.status == InviteStatus::Pending)
            .ok_or_else(|| AppError::not_found("Invite not found"))?;

        self.invite_repo
            .set_status(invite.id, InviteStatus::Expired)
            .await?;

        info!(invite_id = %invite.id, "Invite cancelled");
        Ok(())
    }

    /// Looks up an invite by token for the public acceptance page.
    ///
    /// A read-only probe: it distinguishes accepted and expired invites so
    /// the page can show a meaningful message, but never writes. An unknown
    /// token is a not-found.
    pub async fn validate_invite(&self, token: &str) -> Result<ValidatedInvite, AppError> {
        let invite = self
            .invite_repo
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Invite not found"))?;

        match invite.status {
            InviteStatus::Accepted => Ok(ValidatedInvite::Accepted),
            InviteStatus::Expired => Ok(ValidatedInvite::Expired),
            InviteStatus::Pending if invite.is_expired() => Ok(ValidatedInvite::Expired),
            InviteStatus::Pending => {
                let business = self
                    .business_repo
                    .find_by_id(invite.business_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Business not found"))?;

                Ok(ValidatedInvite::Pending {
                    business_name: business.name,
                    email: invite.email,
                    role: invite.role,
                    expires_at: invite.expires_at,
                })
            }
        }
    }

    /// Accepts an invite on behalf of the authenticated caller.
    ///
    /// Any authenticated holder of the token can redeem it; the invited
    /// email is a delivery address, not a binding. Redemption and
    /// membership creation happen atomically; a pending invite past its
    /// deadline reads the same as any other unusable token.
    pub async fn accept_invite(
        &self,
        ctx: &RequestContext,
        token: &str,
    ) -> Result<StaffMembership, AppError> {
        let invite = self
            .invite_repo
            .find_by_token(token)
            .await?
            .filter(|i| i.is_redeemable())
            .ok_or_else(|| AppError::validation("Invalid or expired invite"))?;

        let membership = self
            .invite_repo
            .accept(
                invite.id,
                &CreateStaffMembership {
                    business_id: invite.business_id,
                    user_id: ctx.user_id,
                    role: invite.role,
                    permissions: invite.permissions.0.clone(),
                },
            )
            .await?;

        info!(invite_id = %invite.id, user_id = %ctx.user_id, "Invite accepted");
        Ok(membership)
    }

    /// Builds the acceptance link for an invite token.
    fn invite_link(&self, token: &str) -> String {
        format!(
            "{}/invite/accept?token={}",
            self.frontend_url.trim_end_matches('/'),
            token
        )
    }

    /// Enqueues a notification job carrying everything the worker needs.
    async fn enqueue_delivery(
        &self,
        ctx: &RequestContext,
        invite: &Invite,
        business_name: &str,
    ) -> Result<(), AppError> {
        // Phone is only known when the invitee already has an account.
        let phone = self
            .user_repo
            .find_by_email(&invite.email)
            .await?
            .and_then(|u| u.phone);

        let payload = StaffInvitePayload {
            email: invite.email.clone(),
            business_name: business_name.to_string(),
            invite_link: self.invite_link(&invite.token),
            role: invite.role.to_string(),
            expires_at_text: invite.expires_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            phone,
        };

        self.job_repo
            .create(&CreateJob {
                job_type: STAFF_INVITE_JOB.to_string(),
                queue: NOTIFICATION_QUEUE.to_string(),
                priority: JobPriority::Normal,
                payload: serde_json::to_value(&payload)?,
                max_attempts: self.max_attempts,
                scheduled_at: None,
                created_by: Some(ctx.user_id),
            })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_outcomes_serialize_as_bare_status() {
        let accepted = serde_json::to_value(ValidatedInvite::Accepted).unwrap();
        assert_eq!(accepted, serde_json::json!({ "status": "accepted" }));

        let expired = serde_json::to_value(ValidatedInvite::Expired).unwrap();
        assert_eq!(expired, serde_json::json!({ "status": "expired" }));
    }

    #[test]
    fn test_pending_outcome_carries_invite_details() {
        let expires_at = Utc::now() + Duration::days(INVITE_TTL_DAYS);
        let value = serde_json::to_value(ValidatedInvite::Pending {
            business_name: "Acme Bakery".into(),
            email: "new.hire@example.com".into(),
            role: BusinessRole::Manager,
            expires_at,
        })
        .unwrap();

        assert_eq!(value["status"], "pending");
        assert_eq!(value["business_name"], "Acme Bakery");
        assert_eq!(value["role"], "manager");
    }
}
