//! Email delivery providers.

use async_trait::async_trait;
use tracing::info;

use bizhub_core::error::AppError;
use bizhub_core::result::AppResult;
use bizhub_core::traits::EmailSender;

/// SendGrid mail API endpoint.
const SENDGRID_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// Sends email through the SendGrid v3 API.
#[derive(Debug)]
pub struct SendgridEmailSender {
    client: reqwest::Client,
    api_key: String,
    from_address: String,
}

impl SendgridEmailSender {
    /// Creates a new SendGrid sender.
    pub fn new(api_key: String, from_address: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            from_address,
        }
    }
}

#[async_trait]
impl EmailSender for SendgridEmailSender {
    async fn send_email(&self, to: &str, subject: &str, html: &str) -> AppResult<()> {
        let body = serde_json::json!({
            "personalizations": [{ "to": [{ "email": to }] }],
            "from": { "email": self.from_address },
            "subject": subject,
            "content": [{ "type": "text/html", "value": html }],
        });

        let response = self
            .client
            .post(SENDGRID_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::external_service(format!("SendGrid request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::external_service(format!(
                "SendGrid returned {status}: {detail}"
            )));
        }

        info!(to, subject, "Email sent via SendGrid");
        Ok(())
    }
}

/// Development sender that logs instead of delivering.
#[derive(Debug)]
pub struct LogEmailSender {
    from_address: String,
}

impl LogEmailSender {
    /// Creates a new logging sender.
    pub fn new(from_address: String) -> Self {
        Self { from_address }
    }
}

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send_email(&self, to: &str, subject: &str, html: &str) -> AppResult<()> {
        info!(
            from = %self.from_address,
            to,
            subject,
            body_bytes = html.len(),
            "Email delivery (log provider)"
        );
        Ok(())
    }
}
