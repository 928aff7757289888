//! Upload handlers.

use axum::Json;
use axum::extract::{Multipart, State};

use bizhub_core::error::AppError;

use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/v1/uploads/avatar
///
/// Accepts a multipart form with a single `file` field, stores it, and
/// records the new avatar URL on the caller's account.
pub async fn upload_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let mut stored = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| "avatar".to_string());

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Failed to read upload: {e}")))?;

        stored = Some(state.upload_service.store_avatar(&filename, &data).await?);
        break;
    }

    let stored = stored.ok_or_else(|| AppError::validation("Missing 'file' field"))?;

    let user = state.auth_service.set_avatar(&auth, stored.url).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}
