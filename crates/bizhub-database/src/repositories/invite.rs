//! Invite repository implementation.

use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use bizhub_core::error::{AppError, ErrorKind};
use bizhub_core::result::AppResult;
use bizhub_entity::invite::model::{CreateInvite, Invite};
use bizhub_entity::invite::status::InviteStatus;
use bizhub_entity::staff::model::CreateStaffMembership;
use bizhub_entity::staff::model::StaffMembership;

use super::is_unique_violation;

/// Repository for staff invitations.
#[derive(Debug, Clone)]
pub struct InviteRepository {
    pool: PgPool,
}

impl InviteRepository {
    /// Create a new invite repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an invite by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Invite>> {
        sqlx::query_as::<_, Invite>("SELECT * FROM invites WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find invite", e))
    }

    /// Find an invite by its redemption token.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<Invite>> {
        sqlx::query_as::<_, Invite>("SELECT * FROM invites WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find invite by token", e)
            })
    }

    /// Find the invite for a (business, email) pair, if any. The email must
    /// already be lowercased.
    pub async fn find_by_business_and_email(
        &self,
        business_id: Uuid,
        email: &str,
    ) -> AppResult<Option<Invite>> {
        sqlx::query_as::<_, Invite>(
            "SELECT * FROM invites WHERE business_id = $1 AND email = $2",
        )
        .bind(business_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find invite", e))
    }

    /// List invites of a business, newest first.
    pub async fn list_for_business(
        &self,
        business_id: Uuid,
        status: Option<InviteStatus>,
    ) -> AppResult<Vec<Invite>> {
        sqlx::query_as::<_, Invite>(
            "SELECT * FROM invites \
             WHERE business_id = $1 AND ($2::invite_status IS NULL OR status = $2) \
             ORDER BY created_at DESC",
        )
        .bind(business_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list invites", e))
    }

    /// Insert a new invite. A concurrent insert for the same (business,
    /// email) pair maps to a conflict.
    pub async fn create(&self, data: &CreateInvite) -> AppResult<Invite> {
        sqlx::query_as::<_, Invite>(
            "INSERT INTO invites (business_id, invited_by, email, role, permissions, token, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(data.business_id)
        .bind(data.invited_by)
        .bind(&data.email)
        .bind(data.role)
        .bind(Json(&data.permissions))
        .bind(&data.token)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("An invite for this email already exists")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create invite", e)
            }
        })
    }

    /// Replace a terminal invite row in place with a fresh pending invite.
    ///
    /// The WHERE clause only matches terminal rows, so a concurrent
    /// acceptance or re-invite leaves this a no-op and the caller sees a
    /// conflict.
    pub async fn replace_terminal(&self, id: Uuid, data: &CreateInvite) -> AppResult<Invite> {
        sqlx::query_as::<_, Invite>(
            "UPDATE invites SET \
             invited_by = $2, role = $3, permissions = $4, token = $5, \
             status = 'pending', expires_at = $6, updated_at = NOW() \
             WHERE id = $1 AND status IN ('accepted', 'expired') RETURNING *",
        )
        .bind(id)
        .bind(data.invited_by)
        .bind(data.role)
        .bind(Json(&data.permissions))
        .bind(&data.token)
        .bind(data.expires_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to replace invite", e))?
        .ok_or_else(|| AppError::conflict("An invite for this email already exists"))
    }

    /// Mark an invite with a terminal or refreshed status.
    pub async fn set_status(&self, id: Uuid, status: InviteStatus) -> AppResult<()> {
        sqlx::query("UPDATE invites SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update invite status", e)
            })?;
        Ok(())
    }

    /// Accept an invite: flip it to accepted and upsert the membership,
    /// atomically.
    ///
    /// The status guard on the UPDATE serializes racing acceptances. A
    /// previously removed member's inactive row is reactivated with the
    /// invite's role and permission snapshot; an existing active
    /// membership leaves the upsert matching nothing, which surfaces as a
    /// conflict and rolls the redemption back.
    pub async fn accept(
        &self,
        invite_id: Uuid,
        membership: &CreateStaffMembership,
    ) -> AppResult<StaffMembership> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let claimed = sqlx::query(
            "UPDATE invites SET status = 'accepted', updated_at = NOW() \
             WHERE id = $1 AND status = 'pending' AND expires_at > NOW()",
        )
        .bind(invite_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to accept invite", e))?;

        if claimed.rows_affected() == 0 {
            return Err(AppError::validation("Invalid or expired invite"));
        }

        let created = sqlx::query_as::<_, StaffMembership>(
            "INSERT INTO staff_memberships (business_id, user_id, role, permissions) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (business_id, user_id) DO UPDATE SET \
             role = EXCLUDED.role, permissions = EXCLUDED.permissions, \
             is_active = TRUE, updated_at = NOW() \
             WHERE staff_memberships.is_active = FALSE \
             RETURNING *",
        )
        .bind(membership.business_id)
        .bind(membership.user_id)
        .bind(membership.role)
        .bind(Json(&membership.permissions))
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create membership", e)
        })?
        .ok_or_else(|| AppError::conflict("User is already a member of this business"))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(created)
    }
}
