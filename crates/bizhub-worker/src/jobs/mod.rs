//! Built-in job handler implementations.

pub mod staff_invite;

pub use staff_invite::StaffInviteJobHandler;
