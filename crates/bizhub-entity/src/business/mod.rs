//! Business entities.

pub mod model;

pub use model::{Business, CreateBusiness, UpdateBusiness};
