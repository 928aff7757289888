//! Business handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use bizhub_core::error::AppError;
use bizhub_database::repositories::business::BusinessWithRole;
use bizhub_entity::business::model::Business;
use bizhub_service::business::service as business_service;

use crate::dto::request::{CreateBusinessRequest, UpdateBusinessRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/v1/businesses
pub async fn create_business(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateBusinessRequest>,
) -> Result<Json<ApiResponse<Business>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let business = state
        .business_service
        .create_business(
            &auth,
            business_service::CreateBusinessRequest {
                name: req.name,
                industry: req.industry,
                phone_number: req.phone_number,
                email: req.email,
                address: req.address,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(business)))
}

/// GET /api/v1/businesses
pub async fn list_businesses(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<BusinessWithRole>>>, ApiError> {
    let businesses = state.business_service.list_businesses(&auth).await?;
    Ok(Json(ApiResponse::ok(businesses)))
}

/// GET /api/v1/businesses/{id}
pub async fn get_business(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Business>>, ApiError> {
    let business = state.business_service.get_business(&auth, id).await?;
    Ok(Json(ApiResponse::ok(business)))
}

/// PUT /api/v1/businesses/{id}
pub async fn update_business(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateBusinessRequest>,
) -> Result<Json<ApiResponse<Business>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let business = state
        .business_service
        .update_business(
            &auth,
            id,
            business_service::UpdateBusinessRequest {
                name: req.name,
                industry: req.industry,
                phone_number: req.phone_number,
                email: req.email,
                address: req.address,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(business)))
}

/// DELETE /api/v1/businesses/{id}
pub async fn delete_business(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.business_service.delete_business(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Business deleted",
    ))))
}
