//! Authentication service.

pub mod service;

pub use service::{AuthService, LoginRequest, LoginResponse, RegisterRequest, UpdateProfileRequest};
