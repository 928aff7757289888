//! Collaborator traits implemented by outer crates.

pub mod notifier;

pub use notifier::{EmailSender, WhatsAppSender};
