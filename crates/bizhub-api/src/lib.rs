//! # bizhub-api
//!
//! HTTP API layer for Bizhub built on Axum.
//!
//! Provides all REST endpoints, the auth extractor, DTOs, error mapping,
//! and the server bootstrap that wires repositories, services, and the
//! notification worker together.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use app::run_server;
pub use state::AppState;
