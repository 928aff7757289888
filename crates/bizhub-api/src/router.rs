//! Route definitions for the Bizhub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api/v1`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.upload.max_size_bytes as usize;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(business_routes())
        .merge(staff_routes())
        .merge(invite_routes())
        .merge(upload_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Auth endpoints: register, login, logout, me, profile
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/profile", put(handlers::auth::update_profile))
}

/// Business CRUD
fn business_routes() -> Router<AppState> {
    Router::new()
        .route("/businesses", post(handlers::business::create_business))
        .route("/businesses", get(handlers::business::list_businesses))
        .route("/businesses/{id}", get(handlers::business::get_business))
        .route("/businesses/{id}", put(handlers::business::update_business))
        .route(
            "/businesses/{id}",
            delete(handlers::business::delete_business),
        )
}

/// Staff membership management
fn staff_routes() -> Router<AppState> {
    Router::new()
        .route("/businesses/{id}/staff", post(handlers::staff::add_staff))
        .route("/businesses/{id}/staff", get(handlers::staff::list_staff))
        .route(
            "/businesses/{id}/staff/{staff_id}",
            get(handlers::staff::get_staff),
        )
        .route(
            "/businesses/{id}/staff/{staff_id}",
            put(handlers::staff::update_staff),
        )
        .route(
            "/businesses/{id}/staff/{staff_id}",
            delete(handlers::staff::remove_staff),
        )
}

/// Invite lifecycle: create, list, resend, cancel, validate, accept
fn invite_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/businesses/{id}/invites",
            post(handlers::invite::create_invite),
        )
        .route(
            "/businesses/{id}/invites",
            get(handlers::invite::list_invites),
        )
        .route(
            "/businesses/{id}/invites/{invite_id}/resend",
            post(handlers::invite::resend_invite),
        )
        .route(
            "/businesses/{id}/invites/{invite_id}/cancel",
            post(handlers::invite::cancel_invite),
        )
        .route("/invites/validate", get(handlers::invite::validate_invite))
        .route("/invites/accept", post(handlers::invite::accept_invite))
}

/// Upload endpoints
fn upload_routes() -> Router<AppState> {
    Router::new().route("/uploads/avatar", post(handlers::upload::upload_avatar))
}

/// Health check endpoint (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::{HeaderValue, Method};
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if cors_config.allowed_headers.contains(&"*".to_string()) {
        cors = cors.allow_headers(Any);
    }

    cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds))
}
