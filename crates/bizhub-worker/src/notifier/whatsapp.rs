//! WhatsApp delivery providers.

use async_trait::async_trait;
use tracing::info;

use bizhub_core::error::AppError;
use bizhub_core::result::AppResult;
use bizhub_core::traits::WhatsAppSender;

/// Sends text messages through the WhatsApp Cloud API.
#[derive(Debug)]
pub struct WhatsAppCloudSender {
    client: reqwest::Client,
    phone_id: String,
    token: String,
}

impl WhatsAppCloudSender {
    /// Creates a new WhatsApp Cloud API sender.
    pub fn new(phone_id: String, token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            phone_id,
            token,
        }
    }

    fn endpoint(&self) -> String {
        format!("https://graph.facebook.com/v19.0/{}/messages", self.phone_id)
    }
}

#[async_trait]
impl WhatsAppSender for WhatsAppCloudSender {
    async fn send_message(&self, phone: &str, message: &str) -> AppResult<()> {
        let body = serde_json::json!({
            "messaging_product": "whatsapp",
            "to": phone,
            "type": "text",
            "text": { "body": message },
        });

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::external_service(format!("WhatsApp request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::external_service(format!(
                "WhatsApp API returned {status}: {detail}"
            )));
        }

        info!(phone, "WhatsApp message sent");
        Ok(())
    }
}

/// Development sender that logs instead of delivering.
#[derive(Debug, Default)]
pub struct LogWhatsAppSender;

impl LogWhatsAppSender {
    /// Creates a new logging sender.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl WhatsAppSender for LogWhatsAppSender {
    async fn send_message(&self, phone: &str, message: &str) -> AppResult<()> {
        info!(phone, message, "WhatsApp delivery (log provider)");
        Ok(())
    }
}
