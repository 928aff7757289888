//! HTTP handlers grouped by domain.

pub mod auth;
pub mod business;
pub mod health;
pub mod invite;
pub mod staff;
pub mod upload;
