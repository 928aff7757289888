//! Staff handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use bizhub_database::repositories::staff::StaffWithProfile;
use bizhub_entity::staff::model::StaffMembership;
use bizhub_service::staff::service as staff_service;

use crate::dto::request::{AddStaffRequest, UpdateStaffRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/v1/businesses/{id}/staff
pub async fn add_staff(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(business_id): Path<Uuid>,
    Json(req): Json<AddStaffRequest>,
) -> Result<Json<ApiResponse<StaffMembership>>, ApiError> {
    let membership = state
        .staff_service
        .add_staff(
            &auth,
            business_id,
            staff_service::AddStaffRequest {
                user_id: req.user_id,
                role: req.role,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(membership)))
}

/// GET /api/v1/businesses/{id}/staff
pub async fn list_staff(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(business_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<StaffWithProfile>>>, ApiError> {
    let staff = state.staff_service.list_staff(&auth, business_id).await?;
    Ok(Json(ApiResponse::ok(staff)))
}

/// GET /api/v1/businesses/{id}/staff/{staff_id}
pub async fn get_staff(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((business_id, staff_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<StaffMembership>>, ApiError> {
    let membership = state
        .staff_service
        .get_staff(&auth, business_id, staff_id)
        .await?;
    Ok(Json(ApiResponse::ok(membership)))
}

/// PUT /api/v1/businesses/{id}/staff/{staff_id}
pub async fn update_staff(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((business_id, staff_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<UpdateStaffRequest>,
) -> Result<Json<ApiResponse<StaffMembership>>, ApiError> {
    let membership = state
        .staff_service
        .update_staff(
            &auth,
            business_id,
            staff_id,
            staff_service::UpdateStaffRequest {
                role: req.role,
                permissions: req.permissions,
                is_active: req.is_active,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(membership)))
}

/// DELETE /api/v1/businesses/{id}/staff/{staff_id}
pub async fn remove_staff(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((business_id, staff_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .staff_service
        .remove_staff(&auth, business_id, staff_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Staff member removed",
    ))))
}
