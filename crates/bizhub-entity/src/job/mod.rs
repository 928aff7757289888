//! Background job entities.

pub mod model;
pub mod payload;
pub mod status;

pub use model::{CreateJob, Job};
pub use payload::StaffInvitePayload;
pub use status::{JobPriority, JobStatus};
