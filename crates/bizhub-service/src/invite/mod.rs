//! Staff invitation service.

pub mod service;
pub mod token;

pub use service::{CreateInviteRequest, InviteService, ValidatedInvite};
pub use token::TokenGenerator;
