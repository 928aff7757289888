//! Auth handlers — register, login, logout, me, profile update.

use axum::Json;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::AppendHeaders;
use validator::Validate;

use bizhub_core::config::AuthConfig;
use bizhub_core::error::AppError;
use bizhub_service::auth::service as auth_service;

use crate::dto::request::{LoginRequest, RegisterRequest, UpdateProfileRequest};
use crate::dto::response::{ApiResponse, LoginResponse, MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

type SessionHeaders = AppendHeaders<[(axum::http::HeaderName, String); 1]>;

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(SessionHeaders, Json<ApiResponse<LoginResponse>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let result = state
        .auth_service
        .register(auth_service::RegisterRequest {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
            phone: req.phone,
        })
        .await?;

    Ok(session_response(&state.config.auth, result))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<(SessionHeaders, Json<ApiResponse<LoginResponse>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let result = state
        .auth_service
        .login(auth_service::LoginRequest {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(session_response(&state.config.auth, result))
}

/// POST /api/v1/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<(SessionHeaders, Json<ApiResponse<MessageResponse>>), ApiError> {
    let cookie = format!(
        "{}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0{}",
        state.config.auth.cookie_name,
        secure_suffix(&state.config.auth)
    );

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(ApiResponse::ok(MessageResponse::new(
            "Logged out successfully",
        ))),
    ))
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.auth_service.current_user(&auth).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/v1/auth/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state
        .auth_service
        .update_profile(
            &auth,
            auth_service::UpdateProfileRequest {
                first_name: req.first_name,
                last_name: req.last_name,
                phone: req.phone,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// Build the session cookie and response body for a login result.
fn session_response(
    config: &AuthConfig,
    result: auth_service::LoginResponse,
) -> (SessionHeaders, Json<ApiResponse<LoginResponse>>) {
    let max_age = (config.jwt_ttl_hours as i64) * 3600;
    let cookie = format!(
        "{}={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}{}",
        config.cookie_name,
        result.token,
        max_age,
        secure_suffix(config)
    );

    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(ApiResponse::ok(LoginResponse {
            token: result.token,
            expires_at: result.expires_at,
            user: result.user.into(),
        })),
    )
}

fn secure_suffix(config: &AuthConfig) -> &'static str {
    if config.cookie_secure { "; Secure" } else { "" }
}
