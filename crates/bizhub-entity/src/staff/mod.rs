//! Staff membership entities: roles, permissions, and the membership model.

pub mod model;
pub mod permission;
pub mod role;

pub use model::{CreateStaffMembership, StaffMembership, UpdateStaffMembership};
pub use permission::BusinessPermission;
pub use role::BusinessRole;
