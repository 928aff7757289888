//! Business CRUD and access checks.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use bizhub_auth::gate::{OwnershipGate, PermissionGate};
use bizhub_core::error::AppError;
use bizhub_database::repositories::business::{BusinessRepository, BusinessWithRole};
use bizhub_database::repositories::staff::StaffRepository;
use bizhub_entity::business::model::{Business, CreateBusiness, UpdateBusiness};
use bizhub_entity::staff::model::CreateStaffMembership;
use bizhub_entity::staff::{BusinessPermission, BusinessRole};

use crate::context::RequestContext;

/// Manages business creation, listing, updates, and deletion.
#[derive(Debug, Clone)]
pub struct BusinessService {
    /// Business repository.
    business_repo: Arc<BusinessRepository>,
    /// Staff repository for the owner membership and permission checks.
    staff_repo: Arc<StaffRepository>,
    /// Ownership gate.
    ownership: OwnershipGate,
    /// Permission gate.
    permissions: PermissionGate,
}

/// Request to create a business.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CreateBusinessRequest {
    pub name: String,
    pub industry: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Request to update a business.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct UpdateBusinessRequest {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl BusinessService {
    /// Creates a new business service.
    pub fn new(business_repo: Arc<BusinessRepository>, staff_repo: Arc<StaffRepository>) -> Self {
        Self {
            business_repo,
            staff_repo,
            ownership: OwnershipGate::new(),
            permissions: PermissionGate::new(),
        }
    }

    /// Creates a business owned by the caller, along with the caller's
    /// owner membership.
    pub async fn create_business(
        &self,
        ctx: &RequestContext,
        req: CreateBusinessRequest,
    ) -> Result<Business, AppError> {
        let business = self
            .business_repo
            .create(&CreateBusiness {
                owner_id: ctx.user_id,
                name: req.name,
                industry: req.industry,
                phone_number: req.phone_number,
                email: req.email,
                address: req.address,
            })
            .await?;

        self.staff_repo
            .create(&CreateStaffMembership::with_default_permissions(
                business.id,
                ctx.user_id,
                BusinessRole::Owner,
            ))
            .await?;

        info!(business_id = %business.id, owner_id = %ctx.user_id, "Business created");
        Ok(business)
    }

    /// Lists the businesses the caller belongs to, with their role in each.
    pub async fn list_businesses(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<BusinessWithRole>, AppError> {
        self.business_repo.find_for_user(ctx.user_id).await
    }

    /// Returns a business the caller can read.
    pub async fn get_business(
        &self,
        ctx: &RequestContext,
        business_id: Uuid,
    ) -> Result<Business, AppError> {
        let membership = self
            .staff_repo
            .find_membership(business_id, ctx.user_id)
            .await?;
        self.permissions
            .require(membership.as_ref(), BusinessPermission::BusinessRead)?;

        self.business_repo
            .find_by_id(business_id)
            .await?
            .ok_or_else(|| AppError::not_found("Business not found"))
    }

    /// Updates a business the caller can modify.
    pub async fn update_business(
        &self,
        ctx: &RequestContext,
        business_id: Uuid,
        req: UpdateBusinessRequest,
    ) -> Result<Business, AppError> {
        let membership = self
            .staff_repo
            .find_membership(business_id, ctx.user_id)
            .await?;
        self.permissions
            .require(membership.as_ref(), BusinessPermission::BusinessUpdate)?;

        self.business_repo
            .update(
                business_id,
                &UpdateBusiness {
                    name: req.name,
                    industry: req.industry,
                    phone_number: req.phone_number,
                    email: req.email,
                    address: req.address,
                },
            )
            .await
    }

    /// Deletes (deactivates) a business. Owner only.
    pub async fn delete_business(
        &self,
        ctx: &RequestContext,
        business_id: Uuid,
    ) -> Result<(), AppError> {
        let business = self.business_repo.find_by_id(business_id).await?;
        self.ownership.require_owner(business.as_ref(), ctx.user_id)?;

        self.business_repo.deactivate(business_id).await?;
        info!(business_id = %business_id, "Business deactivated");
        Ok(())
    }
}
