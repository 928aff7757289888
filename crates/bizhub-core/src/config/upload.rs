//! File upload configuration.

use serde::{Deserialize, Serialize};

/// Upload storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Root directory for uploaded files.
    #[serde(default = "default_root")]
    pub root: String,
    /// Maximum upload size in bytes.
    #[serde(default = "default_max_size")]
    pub max_size_bytes: u64,
    /// Public base URL prefix for uploaded files.
    #[serde(default = "default_public_base")]
    pub public_base: String,
}

fn default_root() -> String {
    "data/uploads".to_string()
}

fn default_max_size() -> u64 {
    5 * 1024 * 1024
}

fn default_public_base() -> String {
    "/uploads".to_string()
}
