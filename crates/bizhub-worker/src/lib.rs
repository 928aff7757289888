//! Background notification processing for Bizhub.
//!
//! This crate provides:
//! - A worker runner that polls for and executes queued jobs
//! - A job executor that dispatches jobs to the correct handler
//! - The staff invite delivery job and its email/WhatsApp senders

pub mod executor;
pub mod jobs;
pub mod notifier;
pub mod queue;
pub mod runner;

pub use runner::WorkerRunner;
