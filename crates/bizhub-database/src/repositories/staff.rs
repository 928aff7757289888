//! Staff membership repository implementation.

use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use bizhub_core::error::{AppError, ErrorKind};
use bizhub_core::result::AppResult;
use bizhub_entity::staff::model::{CreateStaffMembership, StaffMembership, UpdateStaffMembership};

use super::is_unique_violation;

/// A membership joined with the member's profile, for staff listings.
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct StaffWithProfile {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub membership: StaffMembership,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

/// Repository for staff membership CRUD.
#[derive(Debug, Clone)]
pub struct StaffRepository {
    pool: PgPool,
}

impl StaffRepository {
    /// Create a new staff repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a membership by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<StaffMembership>> {
        sqlx::query_as::<_, StaffMembership>("SELECT * FROM staff_memberships WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find membership", e)
            })
    }

    /// Find a user's membership in a business, active or not.
    pub async fn find_membership(
        &self,
        business_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<StaffMembership>> {
        sqlx::query_as::<_, StaffMembership>(
            "SELECT * FROM staff_memberships WHERE business_id = $1 AND user_id = $2",
        )
        .bind(business_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find membership", e))
    }

    /// List active memberships of a business, joined with member profiles.
    pub async fn list_for_business(&self, business_id: Uuid) -> AppResult<Vec<StaffWithProfile>> {
        sqlx::query_as::<_, StaffWithProfile>(
            "SELECT m.*, u.first_name, u.last_name, u.email, u.avatar_url \
             FROM staff_memberships m \
             JOIN users u ON u.id = m.user_id \
             WHERE m.business_id = $1 AND m.is_active = TRUE \
             ORDER BY m.created_at DESC",
        )
        .bind(business_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list staff", e))
    }

    /// Create a membership. A duplicate (business, user) pair maps to a
    /// conflict.
    pub async fn create(&self, data: &CreateStaffMembership) -> AppResult<StaffMembership> {
        sqlx::query_as::<_, StaffMembership>(
            "INSERT INTO staff_memberships (business_id, user_id, role, permissions) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.business_id)
        .bind(data.user_id)
        .bind(data.role)
        .bind(Json(&data.permissions))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("User is already a member of this business")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create membership", e)
            }
        })
    }

    /// Update a membership. Unset fields keep their current values.
    pub async fn update(
        &self,
        id: Uuid,
        data: &UpdateStaffMembership,
    ) -> AppResult<StaffMembership> {
        sqlx::query_as::<_, StaffMembership>(
            "UPDATE staff_memberships SET \
             role = COALESCE($2, role), \
             permissions = COALESCE($3, permissions), \
             is_active = COALESCE($4, is_active), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(data.role)
        .bind(data.permissions.as_ref().map(Json))
        .bind(data.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update membership", e))?
        .ok_or_else(|| AppError::not_found("Staff membership not found"))
    }

    /// Deactivate a membership. Returns the not-found error if it does not
    /// exist or is already inactive.
    pub async fn deactivate(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE staff_memberships SET is_active = FALSE, updated_at = NOW() \
             WHERE id = $1 AND is_active = TRUE",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to deactivate membership", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Staff membership not found"));
        }
        Ok(())
    }
}
