//! Business management service.

pub mod service;

pub use service::{BusinessService, CreateBusinessRequest, UpdateBusinessRequest};
