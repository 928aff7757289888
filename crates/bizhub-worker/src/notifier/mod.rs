//! Email and WhatsApp delivery providers.

pub mod email;
pub mod whatsapp;

use std::sync::Arc;

use bizhub_core::config::NotificationConfig;
use bizhub_core::error::AppError;
use bizhub_core::traits::{EmailSender, WhatsAppSender};

pub use email::{LogEmailSender, SendgridEmailSender};
pub use whatsapp::{LogWhatsAppSender, WhatsAppCloudSender};

/// Builds the email sender named by the configuration.
pub fn build_email_sender(config: &NotificationConfig) -> Result<Arc<dyn EmailSender>, AppError> {
    match config.email_provider.as_str() {
        "log" => Ok(Arc::new(LogEmailSender::new(config.from_address.clone()))),
        "sendgrid" => {
            let api_key = config
                .sendgrid_api_key
                .clone()
                .filter(|k| !k.is_empty())
                .ok_or_else(|| {
                    AppError::configuration("sendgrid_api_key is required for the sendgrid provider")
                })?;
            Ok(Arc::new(SendgridEmailSender::new(
                api_key,
                config.from_address.clone(),
            )))
        }
        other => Err(AppError::configuration(format!(
            "Unknown email provider: '{other}'. Expected 'log' or 'sendgrid'"
        ))),
    }
}

/// Builds the WhatsApp sender, or the logging stand-in when disabled.
pub fn build_whatsapp_sender(
    config: &NotificationConfig,
) -> Result<Arc<dyn WhatsAppSender>, AppError> {
    if !config.whatsapp_enabled {
        return Ok(Arc::new(LogWhatsAppSender::new()));
    }

    let phone_id = config
        .whatsapp_phone_id
        .clone()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            AppError::configuration("whatsapp_phone_id is required when WhatsApp is enabled")
        })?;
    let token = config
        .whatsapp_token
        .clone()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            AppError::configuration("whatsapp_token is required when WhatsApp is enabled")
        })?;

    Ok(Arc::new(WhatsAppCloudSender::new(phone_id, token)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> NotificationConfig {
        NotificationConfig {
            email_provider: "log".into(),
            sendgrid_api_key: None,
            from_address: "no-reply@bizhub.local".into(),
            whatsapp_enabled: false,
            whatsapp_phone_id: None,
            whatsapp_token: None,
            frontend_url: "http://localhost:3000".into(),
        }
    }

    #[test]
    fn test_log_provider_builds_without_credentials() {
        assert!(build_email_sender(&config()).is_ok());
        assert!(build_whatsapp_sender(&config()).is_ok());
    }

    #[test]
    fn test_sendgrid_requires_api_key() {
        let mut cfg = config();
        cfg.email_provider = "sendgrid".into();
        assert!(build_email_sender(&cfg).is_err());

        cfg.sendgrid_api_key = Some("SG.key".into());
        assert!(build_email_sender(&cfg).is_ok());
    }

    #[test]
    fn test_enabled_whatsapp_requires_credentials() {
        let mut cfg = config();
        cfg.whatsapp_enabled = true;
        assert!(build_whatsapp_sender(&cfg).is_err());

        cfg.whatsapp_phone_id = Some("12345".into());
        cfg.whatsapp_token = Some("token".into());
        assert!(build_whatsapp_sender(&cfg).is_ok());
    }

    #[test]
    fn test_unknown_email_provider_is_rejected() {
        let mut cfg = config();
        cfg.email_provider = "smtp".into();
        assert!(build_email_sender(&cfg).is_err());
    }
}
