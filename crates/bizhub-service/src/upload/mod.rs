//! File upload service.

pub mod service;

pub use service::{StoredFile, UploadService};
