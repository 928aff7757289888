//! Registration, login, and profile management.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use bizhub_auth::jwt::JwtEncoder;
use bizhub_auth::password::PasswordHasher;
use bizhub_core::error::AppError;
use bizhub_database::repositories::user::UserRepository;
use bizhub_entity::user::model::{CreateUser, UpdateUser, User};

use crate::context::RequestContext;

/// Manages user registration, login, and profile updates.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// JWT encoder for session tokens.
    encoder: Arc<JwtEncoder>,
    /// Minimum accepted password length.
    password_min_length: usize,
}

/// Request to register a new account.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

/// Request to log in.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Result of a successful login or registration.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    /// The authenticated user.
    pub user: User,
    /// Signed session token.
    pub token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
}

/// Request to update the caller's profile.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        password_min_length: usize,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            encoder,
            password_min_length,
        }
    }

    /// Registers a new account and logs it in.
    ///
    /// Emails are lowercased before storage and lookup, so registration
    /// and login are case-insensitive on the email.
    pub async fn register(&self, req: RegisterRequest) -> Result<LoginResponse, AppError> {
        if req.password.len() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.password_min_length
            )));
        }

        let email = req.email.trim().to_lowercase();
        let password_hash = self.hasher.hash_password(&req.password)?;

        let user = self
            .user_repo
            .create(&CreateUser {
                first_name: req.first_name,
                last_name: req.last_name,
                email,
                password_hash,
                phone: req.phone,
            })
            .await?;

        info!(user_id = %user.id, "User registered");

        let (token, expires_at) = self.encoder.generate_token(user.id, &user.email)?;
        Ok(LoginResponse {
            user,
            token,
            expires_at,
        })
    }

    /// Authenticates an email/password pair and issues a session token.
    ///
    /// Wrong email and wrong password produce the same error, so a caller
    /// cannot tell which half was wrong.
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, AppError> {
        let email = req.email.trim().to_lowercase();

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        let valid = self.hasher.verify_password(&req.password, &user.password_hash)?;
        if !valid {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        info!(user_id = %user.id, "User logged in");

        let (token, expires_at) = self.encoder.generate_token(user.id, &user.email)?;
        Ok(LoginResponse {
            user,
            token,
            expires_at,
        })
    }

    /// Returns the caller's own account.
    pub async fn current_user(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| AppError::unauthorized("Account no longer exists"))
    }

    /// Updates the caller's profile.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        req: UpdateProfileRequest,
    ) -> Result<User, AppError> {
        self.user_repo
            .update(
                ctx.user_id,
                &UpdateUser {
                    first_name: req.first_name,
                    last_name: req.last_name,
                    phone: req.phone,
                    avatar_url: None,
                },
            )
            .await
    }

    /// Records a new avatar URL on the caller's account.
    pub async fn set_avatar(&self, ctx: &RequestContext, avatar_url: String) -> Result<User, AppError> {
        self.user_repo
            .update(
                ctx.user_id,
                &UpdateUser {
                    avatar_url: Some(avatar_url),
                    ..Default::default()
                },
            )
            .await
    }
}
