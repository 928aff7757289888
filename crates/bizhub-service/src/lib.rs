//! # bizhub-service
//!
//! Business logic services for Bizhub. Services orchestrate repositories,
//! auth primitives, and the job queue; they never touch HTTP concerns.

pub mod auth;
pub mod business;
pub mod context;
pub mod invite;
pub mod staff;
pub mod upload;

pub use context::RequestContext;
