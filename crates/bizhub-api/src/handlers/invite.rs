//! Invite handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;
use validator::Validate;

use bizhub_core::error::AppError;
use bizhub_entity::invite::model::Invite;
use bizhub_entity::staff::model::StaffMembership;
use bizhub_service::invite::service::{self as invite_service, ValidatedInvite};

use crate::dto::request::{
    AcceptInviteRequest, InviteStaffRequest, ListInvitesQuery, ValidateInviteQuery,
};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/v1/businesses/{id}/invites
pub async fn create_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(business_id): Path<Uuid>,
    Json(req): Json<InviteStaffRequest>,
) -> Result<Json<ApiResponse<Invite>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let invite = state
        .invite_service
        .create_invite(
            &auth,
            business_id,
            invite_service::CreateInviteRequest {
                email: req.email,
                role: req.role,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(invite)))
}

/// GET /api/v1/businesses/{id}/invites?status=...
pub async fn list_invites(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(business_id): Path<Uuid>,
    Query(query): Query<ListInvitesQuery>,
) -> Result<Json<ApiResponse<Vec<Invite>>>, ApiError> {
    let invites = state
        .invite_service
        .list_invites(&auth, business_id, query.status)
        .await?;
    Ok(Json(ApiResponse::ok(invites)))
}

/// POST /api/v1/businesses/{id}/invites/{invite_id}/resend
pub async fn resend_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((business_id, invite_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .invite_service
        .resend_invite(&auth, business_id, invite_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Invite resent"))))
}

/// POST /api/v1/businesses/{id}/invites/{invite_id}/cancel
pub async fn cancel_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((business_id, invite_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .invite_service
        .cancel_invite(&auth, business_id, invite_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Invite cancelled",
    ))))
}

/// GET /api/v1/invites/validate?token=...
///
/// Public: shows the acceptance page what it is accepting.
pub async fn validate_invite(
    State(state): State<AppState>,
    Query(query): Query<ValidateInviteQuery>,
) -> Result<Json<ApiResponse<ValidatedInvite>>, ApiError> {
    let invite = state.invite_service.validate_invite(&query.token).await?;
    Ok(Json(ApiResponse::ok(invite)))
}

/// POST /api/v1/invites/accept
pub async fn accept_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<AcceptInviteRequest>,
) -> Result<Json<ApiResponse<StaffMembership>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let membership = state.invite_service.accept_invite(&auth, &req.token).await?;
    Ok(Json(ApiResponse::ok(membership)))
}
