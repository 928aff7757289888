//! # bizhub-entity
//!
//! Domain entity models and enums for Bizhub: users, businesses, staff
//! memberships, invites, and background jobs.

pub mod business;
pub mod invite;
pub mod job;
pub mod staff;
pub mod user;
