//! Staff management service.

pub mod service;

pub use service::{StaffService, UpdateStaffRequest};
