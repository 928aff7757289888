//! Staff listing, updates, and removal.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use bizhub_auth::gate::PermissionGate;
use bizhub_core::error::AppError;
use bizhub_database::repositories::staff::{StaffRepository, StaffWithProfile};
use bizhub_database::repositories::user::UserRepository;
use bizhub_entity::staff::model::{
    CreateStaffMembership, StaffMembership, UpdateStaffMembership,
};
use bizhub_entity::staff::{BusinessPermission, BusinessRole};

use crate::context::RequestContext;

/// Manages staff memberships within a business.
#[derive(Debug, Clone)]
pub struct StaffService {
    /// Staff repository.
    staff_repo: Arc<StaffRepository>,
    /// User repository for existence checks on direct adds.
    user_repo: Arc<UserRepository>,
    /// Permission gate.
    permissions: PermissionGate,
}

/// Request to add an existing user directly to a business.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct AddStaffRequest {
    pub user_id: Uuid,
    pub role: BusinessRole,
}

/// Request to update a staff member.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct UpdateStaffRequest {
    pub role: Option<BusinessRole>,
    pub permissions: Option<Vec<BusinessPermission>>,
    pub is_active: Option<bool>,
}

impl StaffService {
    /// Creates a new staff service.
    pub fn new(staff_repo: Arc<StaffRepository>, user_repo: Arc<UserRepository>) -> Self {
        Self {
            staff_repo,
            user_repo,
            permissions: PermissionGate::new(),
        }
    }

    /// Adds an existing user to a business with a role's default
    /// permission snapshot.
    pub async fn add_staff(
        &self,
        ctx: &RequestContext,
        business_id: Uuid,
        req: AddStaffRequest,
    ) -> Result<StaffMembership, AppError> {
        let membership = self
            .staff_repo
            .find_membership(business_id, ctx.user_id)
            .await?;
        self.permissions
            .require(membership.as_ref(), BusinessPermission::StaffInvite)?;

        if req.role == BusinessRole::Owner {
            return Err(AppError::validation("A business has exactly one owner"));
        }

        self.user_repo
            .find_by_id(req.user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let created = self
            .staff_repo
            .create(&CreateStaffMembership::with_default_permissions(
                business_id,
                req.user_id,
                req.role,
            ))
            .await?;

        info!(business_id = %business_id, user_id = %req.user_id, "Staff member added");
        Ok(created)
    }

    /// Returns one active membership of a business.
    pub async fn get_staff(
        &self,
        ctx: &RequestContext,
        business_id: Uuid,
        staff_id: Uuid,
    ) -> Result<StaffMembership, AppError> {
        let membership = self
            .staff_repo
            .find_membership(business_id, ctx.user_id)
            .await?;
        self.permissions
            .require(membership.as_ref(), BusinessPermission::StaffRead)?;

        self.staff_repo
            .find_by_id(staff_id)
            .await?
            .filter(|m| m.business_id == business_id && m.is_active)
            .ok_or_else(|| AppError::not_found("Staff membership not found"))
    }

    /// Lists the active staff of a business with member profiles.
    pub async fn list_staff(
        &self,
        ctx: &RequestContext,
        business_id: Uuid,
    ) -> Result<Vec<StaffWithProfile>, AppError> {
        let membership = self
            .staff_repo
            .find_membership(business_id, ctx.user_id)
            .await?;
        self.permissions
            .require(membership.as_ref(), BusinessPermission::StaffRead)?;

        self.staff_repo.list_for_business(business_id).await
    }

    /// Updates a staff member's role or permission set.
    ///
    /// When the role changes without an explicit permission set, the
    /// snapshot is refreshed from the new role's defaults. Owner
    /// memberships cannot be edited.
    pub async fn update_staff(
        &self,
        ctx: &RequestContext,
        business_id: Uuid,
        staff_id: Uuid,
        req: UpdateStaffRequest,
    ) -> Result<StaffMembership, AppError> {
        let membership = self
            .staff_repo
            .find_membership(business_id, ctx.user_id)
            .await?;
        self.permissions
            .require(membership.as_ref(), BusinessPermission::StaffUpdate)?;

        let target = self.target_in_business(business_id, staff_id).await?;
        if target.role == BusinessRole::Owner {
            return Err(AppError::forbidden("The owner membership cannot be modified"));
        }

        let permissions = match (&req.permissions, req.role) {
            (Some(explicit), _) => Some(explicit.clone()),
            (None, Some(role)) => Some(role.default_permissions()),
            (None, None) => None,
        };

        self.staff_repo
            .update(
                staff_id,
                &UpdateStaffMembership {
                    role: req.role,
                    permissions,
                    is_active: req.is_active,
                },
            )
            .await
    }

    /// Removes (deactivates) a staff member. The owner cannot be removed.
    pub async fn remove_staff(
        &self,
        ctx: &RequestContext,
        business_id: Uuid,
        staff_id: Uuid,
    ) -> Result<(), AppError> {
        let membership = self
            .staff_repo
            .find_membership(business_id, ctx.user_id)
            .await?;
        self.permissions
            .require(membership.as_ref(), BusinessPermission::StaffRemove)?;

        let target = self.target_in_business(business_id, staff_id).await?;
        if target.role == BusinessRole::Owner {
            return Err(AppError::forbidden("The owner cannot be removed"));
        }

        self.staff_repo.deactivate(staff_id).await?;
        info!(business_id = %business_id, staff_id = %staff_id, "Staff member removed");
        Ok(())
    }

    /// Fetch a membership and verify it belongs to the business in the
    /// request path.
    async fn target_in_business(
        &self,
        business_id: Uuid,
        staff_id: Uuid,
    ) -> Result<StaffMembership, AppError> {
        self.staff_repo
            .find_by_id(staff_id)
            .await?
            .filter(|m| m.business_id == business_id)
            .ok_or_else(|| AppError::not_found("Staff membership not found"))
    }
}
