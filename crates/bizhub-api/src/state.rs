//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use bizhub_auth::jwt::decoder::JwtDecoder;
use bizhub_core::config::AppConfig;

use bizhub_service::auth::service::AuthService;
use bizhub_service::business::service::BusinessService;
use bizhub_service::invite::service::InviteService;
use bizhub_service::staff::service::StaffService;
use bizhub_service::upload::service::UploadService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool
    pub db_pool: PgPool,

    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    /// Registration, login, and profile service
    pub auth_service: Arc<AuthService>,
    /// Business management service
    pub business_service: Arc<BusinessService>,
    /// Staff management service
    pub staff_service: Arc<StaffService>,
    /// Invite lifecycle service
    pub invite_service: Arc<InviteService>,
    /// Upload storage service
    pub upload_service: Arc<UploadService>,
}
