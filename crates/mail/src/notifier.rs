//! Best-effort dispatch of contact-form emails.

use std::sync::Arc;

use showcase_db::models::contact::Contact;

use crate::config::{ContactMailSettings, MailConfig};
use crate::error::EmailError;
use crate::templates::{ContactTemplate, Templates};
use crate::transport::{MailTransport, OutgoingEmail, SmtpMailTransport};

/// Outcome of one [`ContactMailer::notify_submission`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub sent: usize,
    pub failed: usize,
    /// `true` when no transport is configured and nothing was attempted.
    pub skipped: bool,
}

/// Composes and sends the emails for a new contact submission.
///
/// Failures never propagate: every error is logged and counted in the
/// returned [`DispatchReport`].
pub struct ContactMailer {
    transport: Option<Arc<dyn MailTransport>>,
    templates: Templates,
    settings: ContactMailSettings,
}

impl ContactMailer {
    pub fn new(
        transport: Arc<dyn MailTransport>,
        settings: ContactMailSettings,
    ) -> Result<Self, EmailError> {
        Ok(Self {
            transport: Some(transport),
            templates: Templates::new()?,
            settings,
        })
    }

    /// A mailer that logs and skips every send.
    pub fn disabled(settings: ContactMailSettings) -> Result<Self, EmailError> {
        Ok(Self {
            transport: None,
            templates: Templates::new()?,
            settings,
        })
    }

    /// Build from the environment: SMTP when `SMTP_HOST` is set, otherwise
    /// [`ContactMailer::disabled`].
    pub fn from_env() -> Result<Self, EmailError> {
        let settings = ContactMailSettings::from_env();
        match MailConfig::from_env() {
            Some(config) => {
                let transport = SmtpMailTransport::new(&config)?;
                tracing::info!(
                    smtp_host = %config.smtp_host,
                    smtp_port = config.smtp_port,
                    "Contact email delivery enabled"
                );
                Self::new(Arc::new(transport), settings)
            }
            None => {
                tracing::warn!("SMTP_HOST not set; contact emails will be skipped");
                Self::disabled(settings)
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    /// Render the messages for `contact`, in send order.
    ///
    /// The operator message is omitted when no inbox is configured and the
    /// fixed notification when no notification recipient is configured.
    pub fn compose(&self, contact: &Contact) -> Result<Vec<OutgoingEmail>, EmailError> {
        let recipients = [
            (ContactTemplate::Operator, self.settings.inbox.as_deref()),
            (ContactTemplate::Confirmation, Some(contact.email.as_str())),
            (
                ContactTemplate::Notification,
                self.settings.notify_email.as_deref(),
            ),
        ];

        recipients
            .into_iter()
            .filter_map(|(template, to)| to.map(|to| (template, to)))
            .map(|(template, to)| {
                Ok(OutgoingEmail {
                    to: to.to_string(),
                    subject: template.subject(contact),
                    html: self.templates.render(template, contact, &self.settings)?,
                })
            })
            .collect()
    }

    /// Send every message for a new submission, one after another.
    pub async fn notify_submission(&self, contact: &Contact) -> DispatchReport {
        let Some(transport) = &self.transport else {
            tracing::info!(contact_id = contact.id, "Email delivery not configured, skipping");
            return DispatchReport {
                skipped: true,
                ..Default::default()
            };
        };

        let emails = match self.compose(contact) {
            Ok(emails) => emails,
            Err(e) => {
                tracing::error!(contact_id = contact.id, error = %e, "Failed to render contact emails");
                return DispatchReport {
                    failed: 1,
                    ..Default::default()
                };
            }
        };

        let mut report = DispatchReport::default();
        for email in &emails {
            match transport.send(email).await {
                Ok(()) => {
                    report.sent += 1;
                    tracing::info!(contact_id = contact.id, to = %email.to, "Contact email sent");
                }
                Err(e) => {
                    report.failed += 1;
                    tracing::error!(
                        contact_id = contact.id,
                        to = %email.to,
                        error = %e,
                        "Contact email failed"
                    );
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<OutgoingEmail>>,
    }

    #[async_trait]
    impl MailTransport for RecordingTransport {
        async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        }
    }

    /// Fails every message addressed to `bad_recipient`.
    struct FlakyTransport {
        bad_recipient: String,
        attempts: Mutex<usize>,
    }

    #[async_trait]
    impl MailTransport for FlakyTransport {
        async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
            *self.attempts.lock().unwrap() += 1;
            if email.to == self.bad_recipient {
                Err(EmailError::Build("relay refused".into()))
            } else {
                Ok(())
            }
        }
    }

    fn contact() -> Contact {
        let now = Utc::now();
        Contact {
            id: 7,
            name: "Ada <script>".into(),
            email: "ada@example.com".into(),
            subject: "Website quote".into(),
            message: "First line\nSecond & last line".into(),
            status: "NEW".into(),
            priority: "LOW".into(),
            source: "WEBSITE".into(),
            admin_notes: None,
            replied_by: None,
            ip_address: Some("203.0.113.7".into()),
            user_agent: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn settings() -> ContactMailSettings {
        ContactMailSettings {
            inbox: Some("inbox@example.com".into()),
            notify_email: Some("owner@example.com".into()),
            frontend_url: "https://example.com".into(),
            site_name: "Acme".into(),
        }
    }

    #[tokio::test]
    async fn sends_three_messages_in_order() {
        let transport = Arc::new(RecordingTransport::default());
        let mailer = ContactMailer::new(transport.clone(), settings()).unwrap();

        let report = mailer.notify_submission(&contact()).await;
        assert_eq!(report, DispatchReport { sent: 3, failed: 0, skipped: false });

        let sent = transport.sent.lock().unwrap();
        let to: Vec<&str> = sent.iter().map(|e| e.to.as_str()).collect();
        assert_eq!(to, vec!["inbox@example.com", "ada@example.com", "owner@example.com"]);
        assert_eq!(sent[0].subject, "New Contact Form Submission: Website quote");
        assert_eq!(sent[1].subject, "Thank you for contacting us - Website quote");
        assert!(sent[0].html.contains("https://example.com/admin/contacts"));
        assert!(sent[2].html.contains("203.0.113.7"));
    }

    #[tokio::test]
    async fn escapes_user_input_and_keeps_line_breaks() {
        let mailer =
            ContactMailer::new(Arc::new(RecordingTransport::default()), settings()).unwrap();
        let emails = mailer.compose(&contact()).unwrap();
        let html = &emails[0].html;
        assert!(html.contains("Ada &lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("First line<br>Second &amp; last line"));
    }

    #[tokio::test]
    async fn unconfigured_recipients_are_left_out() {
        let mailer = ContactMailer::new(
            Arc::new(RecordingTransport::default()),
            ContactMailSettings::default(),
        )
        .unwrap();
        let emails = mailer.compose(&contact()).unwrap();
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].to, "ada@example.com");
    }

    #[tokio::test]
    async fn failures_are_counted_not_propagated() {
        let transport = Arc::new(FlakyTransport {
            bad_recipient: "inbox@example.com".into(),
            attempts: Mutex::new(0),
        });
        let mailer = ContactMailer::new(transport.clone(), settings()).unwrap();

        let report = mailer.notify_submission(&contact()).await;
        assert_eq!(report.sent, 2);
        assert_eq!(report.failed, 1);
        // A failed operator message does not stop the confirmation.
        assert_eq!(*transport.attempts.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn disabled_mailer_skips() {
        let mailer = ContactMailer::disabled(settings()).unwrap();
        assert!(!mailer.is_enabled());
        let report = mailer.notify_submission(&contact()).await;
        assert!(report.skipped);
        assert_eq!(report.sent, 0);
    }
}
