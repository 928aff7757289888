//! # bizhub-auth
//!
//! Authentication and authorization primitives for Bizhub.
//!
//! ## Modules
//!
//! - `jwt` — JWT token creation and validation
//! - `password` — Argon2id password hashing
//! - `gate` — business ownership and permission gates

pub mod gate;
pub mod jwt;
pub mod password;

pub use gate::{OwnershipGate, PermissionGate};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
