//! Business repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use bizhub_core::error::{AppError, ErrorKind};
use bizhub_core::result::AppResult;
use bizhub_entity::business::model::{Business, CreateBusiness, UpdateBusiness};
use bizhub_entity::staff::BusinessRole;

/// A business joined with the caller's role in it, for membership listings.
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct BusinessWithRole {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub business: Business,
    pub role: BusinessRole,
}

/// Repository for business CRUD.
#[derive(Debug, Clone)]
pub struct BusinessRepository {
    pool: PgPool,
}

impl BusinessRepository {
    /// Create a new business repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an active business by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Business>> {
        sqlx::query_as::<_, Business>(
            "SELECT * FROM businesses WHERE id = $1 AND is_active = TRUE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find business", e))
    }

    /// List active businesses the user belongs to, with their role in each.
    pub async fn find_for_user(&self, user_id: Uuid) -> AppResult<Vec<BusinessWithRole>> {
        sqlx::query_as::<_, BusinessWithRole>(
            "SELECT b.*, m.role FROM businesses b \
             JOIN staff_memberships m ON m.business_id = b.id \
             WHERE m.user_id = $1 AND m.is_active = TRUE AND b.is_active = TRUE \
             ORDER BY b.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list businesses for user", e)
        })
    }

    /// Create a new business.
    pub async fn create(&self, data: &CreateBusiness) -> AppResult<Business> {
        sqlx::query_as::<_, Business>(
            "INSERT INTO businesses (owner_id, name, industry, phone_number, email, address) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(data.owner_id)
        .bind(&data.name)
        .bind(&data.industry)
        .bind(&data.phone_number)
        .bind(&data.email)
        .bind(&data.address)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create business", e))
    }

    /// Update a business. Unset fields keep their current values.
    pub async fn update(&self, id: Uuid, data: &UpdateBusiness) -> AppResult<Business> {
        sqlx::query_as::<_, Business>(
            "UPDATE businesses SET \
             name = COALESCE($2, name), \
             industry = COALESCE($3, industry), \
             phone_number = COALESCE($4, phone_number), \
             email = COALESCE($5, email), \
             address = COALESCE($6, address), \
             updated_at = NOW() \
             WHERE id = $1 AND is_active = TRUE RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.industry)
        .bind(&data.phone_number)
        .bind(&data.email)
        .bind(&data.address)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update business", e))?
        .ok_or_else(|| AppError::not_found("Business not found"))
    }

    /// Deactivate a business along with all of its staff memberships, in
    /// one transaction.
    pub async fn deactivate(&self, id: Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let result = sqlx::query(
            "UPDATE businesses SET is_active = FALSE, updated_at = NOW() \
             WHERE id = $1 AND is_active = TRUE",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to deactivate business", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Business not found"));
        }

        sqlx::query(
            "UPDATE staff_memberships SET is_active = FALSE, updated_at = NOW() \
             WHERE business_id = $1 AND is_active = TRUE",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to deactivate memberships", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }
}
