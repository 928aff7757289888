//! Invite notification configuration.

use serde::{Deserialize, Serialize};

/// Notification delivery configuration for the invite pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Email provider: `"sendgrid"` or `"log"` (development).
    #[serde(default = "default_provider")]
    pub email_provider: String,
    /// SendGrid API key (required when `email_provider = "sendgrid"`).
    #[serde(default)]
    pub sendgrid_api_key: Option<String>,
    /// Sender address for outbound mail.
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// Whether WhatsApp delivery is enabled.
    #[serde(default)]
    pub whatsapp_enabled: bool,
    /// WhatsApp Cloud API phone number ID.
    #[serde(default)]
    pub whatsapp_phone_id: Option<String>,
    /// WhatsApp Cloud API access token.
    #[serde(default)]
    pub whatsapp_token: Option<String>,
    /// Frontend base URL used to build invite redemption links.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
}

fn default_provider() -> String {
    "log".to_string()
}

fn default_from_address() -> String {
    "no-reply@bizhub.local".to_string()
}

fn default_frontend_url() -> String {
    "http://localhost:3000".to_string()
}
