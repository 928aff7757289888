//! Business-level authorization gates.

pub mod ownership;
pub mod permission;

pub use ownership::OwnershipGate;
pub use permission::PermissionGate;
