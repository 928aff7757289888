//! Staff invite delivery job.

use std::sync::Arc;

use async_trait::async_trait;
use tracing;

use bizhub_core::traits::{EmailSender, WhatsAppSender};
use bizhub_entity::job::model::Job;
use bizhub_entity::job::payload::{STAFF_INVITE_JOB, StaffInvitePayload};

use crate::executor::{JobExecutionError, JobHandler};

/// HTML body of the invite email. Placeholders use `{{name}}` syntax.
const EMAIL_TEMPLATE: &str = r#"<div style="font-family: sans-serif; max-width: 600px; margin: 0 auto;">
  <h2>You've been invited to join {{business_name}}</h2>
  <p>You have been invited to join <strong>{{business_name}}</strong> as a <strong>{{role}}</strong>.</p>
  <p>
    <a href="{{invite_link}}" style="display: inline-block; padding: 12px 24px; background: #2563eb; color: #fff; text-decoration: none; border-radius: 6px;">
      Accept invitation
    </a>
  </p>
  <p>This invitation expires on {{expires_at}}.</p>
  <p style="color: #6b7280; font-size: 12px;">If you weren't expecting this invitation, you can ignore this email.</p>
</div>"#;

/// Plain-text body of the WhatsApp message.
const WHATSAPP_TEMPLATE: &str = "You've been invited to join {{business_name}} as a {{role}}. \
Accept here: {{invite_link}} (expires {{expires_at}})";

/// Delivers staff invitations over email and, when a phone number is
/// known, WhatsApp.
#[derive(Debug)]
pub struct StaffInviteJobHandler {
    /// Email delivery provider.
    email: Arc<dyn EmailSender>,
    /// WhatsApp delivery provider.
    whatsapp: Arc<dyn WhatsAppSender>,
}

impl StaffInviteJobHandler {
    /// Create a new staff invite handler.
    pub fn new(email: Arc<dyn EmailSender>, whatsapp: Arc<dyn WhatsAppSender>) -> Self {
        Self { email, whatsapp }
    }
}

#[async_trait]
impl JobHandler for StaffInviteJobHandler {
    fn job_type(&self) -> &str {
        STAFF_INVITE_JOB
    }

    async fn execute(&self, job: &Job) -> Result<(), JobExecutionError> {
        // A payload that cannot be parsed will never succeed.
        let payload: StaffInvitePayload =
            serde_json::from_value(job.payload.clone()).map_err(|e| {
                JobExecutionError::Permanent(format!("Invalid staff invite payload: {e}"))
            })?;

        let subject = format!("Invitation to join {}", payload.business_name);
        let html = render_template(EMAIL_TEMPLATE, &payload);

        self.email
            .send_email(&payload.email, &subject, &html)
            .await
            .map_err(|e| JobExecutionError::Transient(format!("Email delivery failed: {e}")))?;

        // WhatsApp is best-effort: the email is the delivery of record.
        if let Some(ref phone) = payload.phone {
            let message = render_template(WHATSAPP_TEMPLATE, &payload);
            if let Err(e) = self.whatsapp.send_message(phone, &message).await {
                tracing::warn!(
                    job_id = %job.id,
                    phone,
                    "WhatsApp delivery failed: {e}"
                );
            }
        }

        Ok(())
    }
}

/// Substitute `{{placeholder}}` markers with payload values.
fn render_template(template: &str, payload: &StaffInvitePayload) -> String {
    template
        .replace("{{business_name}}", &payload.business_name)
        .replace("{{role}}", &payload.role)
        .replace("{{invite_link}}", &payload.invite_link)
        .replace("{{expires_at}}", &payload.expires_at_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;
    use uuid::Uuid;

    use bizhub_core::error::AppError;
    use bizhub_core::result::AppResult;
    use bizhub_entity::job::status::{JobPriority, JobStatus};

    #[derive(Debug, Default)]
    struct RecordingEmail {
        sent: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl EmailSender for RecordingEmail {
        async fn send_email(&self, to: &str, subject: &str, _html: &str) -> AppResult<()> {
            if self.fail {
                return Err(AppError::external_service("provider down"));
            }
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), subject.to_string()));
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    struct RecordingWhatsApp {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl WhatsAppSender for RecordingWhatsApp {
        async fn send_message(&self, phone: &str, _message: &str) -> AppResult<()> {
            self.sent.lock().unwrap().push(phone.to_string());
            Ok(())
        }
    }

    fn payload(phone: Option<&str>) -> StaffInvitePayload {
        StaffInvitePayload {
            email: "new.hire@example.com".into(),
            business_name: "Acme Bakery".into(),
            invite_link: "http://localhost:3000/invite/accept?token=abc".into(),
            role: "staff".into(),
            expires_at_text: "2026-09-05 12:00 UTC".into(),
            phone: phone.map(str::to_string),
        }
    }

    fn job(payload: serde_json::Value) -> Job {
        Job {
            id: Uuid::new_v4(),
            job_type: STAFF_INVITE_JOB.into(),
            queue: "notifications".into(),
            priority: JobPriority::Normal,
            payload,
            error_message: None,
            status: JobStatus::Running,
            attempts: 1,
            max_attempts: 3,
            scheduled_at: None,
            started_at: Some(Utc::now()),
            completed_at: None,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_render_template_fills_placeholders() {
        let html = render_template(EMAIL_TEMPLATE, &payload(None));
        assert!(html.contains("Acme Bakery"));
        assert!(html.contains("http://localhost:3000/invite/accept?token=abc"));
        assert!(html.contains("2026-09-05 12:00 UTC"));
        assert!(!html.contains("{{"));
    }

    #[tokio::test]
    async fn test_sends_email_and_whatsapp_when_phone_known() {
        let email = Arc::new(RecordingEmail::default());
        let whatsapp = Arc::new(RecordingWhatsApp::default());
        let handler = StaffInviteJobHandler::new(email.clone(), whatsapp.clone());

        let job = job(serde_json::to_value(payload(Some("+15551234567"))).unwrap());
        handler.execute(&job).await.unwrap();

        let sent = email.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "new.hire@example.com");
        assert_eq!(sent[0].1, "Invitation to join Acme Bakery");
        assert_eq!(whatsapp.sent.lock().unwrap().as_slice(), ["+15551234567"]);
    }

    #[tokio::test]
    async fn test_email_failure_is_transient() {
        let email = Arc::new(RecordingEmail {
            fail: true,
            ..Default::default()
        });
        let handler = StaffInviteJobHandler::new(email, Arc::new(RecordingWhatsApp::default()));

        let err = handler
            .execute(&job(serde_json::to_value(payload(None)).unwrap()))
            .await
            .unwrap_err();
        assert!(matches!(err, JobExecutionError::Transient(_)));
    }

    #[tokio::test]
    async fn test_bad_payload_is_permanent() {
        let handler = StaffInviteJobHandler::new(
            Arc::new(RecordingEmail::default()),
            Arc::new(RecordingWhatsApp::default()),
        );

        let err = handler
            .execute(&job(serde_json::json!({"unexpected": true})))
            .await
            .unwrap_err();
        assert!(matches!(err, JobExecutionError::Permanent(_)));
    }
}
