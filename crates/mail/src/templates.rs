//! HTML message templates for contact-form emails.
//!
//! Templates are compiled once into a `minijinja` environment. Their names
//! end in `.html`, so every interpolated value is HTML-escaped.

use minijinja::{context, Environment};
use showcase_db::models::contact::Contact;

use crate::config::ContactMailSettings;
use crate::error::EmailError;

/// The messages sent for one contact submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactTemplate {
    /// Full submission details for the operator inbox.
    Operator,
    /// Receipt for the person who submitted the form.
    Confirmation,
    /// Short alert for the fixed notification recipient.
    Notification,
}

impl ContactTemplate {
    fn name(self) -> &'static str {
        match self {
            ContactTemplate::Operator => "contact_operator.html",
            ContactTemplate::Confirmation => "contact_confirmation.html",
            ContactTemplate::Notification => "contact_notification.html",
        }
    }

    /// Subject line for `contact`.
    pub fn subject(self, contact: &Contact) -> String {
        match self {
            ContactTemplate::Operator => {
                format!("New Contact Form Submission: {}", contact.subject)
            }
            ContactTemplate::Confirmation => {
                format!("Thank you for contacting us - {}", contact.subject)
            }
            ContactTemplate::Notification => {
                "New Contact Form Submission - Notification".to_string()
            }
        }
    }
}

/// Compiled contact-email templates.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, EmailError> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.add_template(
            ContactTemplate::Operator.name(),
            include_str!("../templates/contact_operator.html"),
        )?;
        env.add_template(
            ContactTemplate::Confirmation.name(),
            include_str!("../templates/contact_confirmation.html"),
        )?;
        env.add_template(
            ContactTemplate::Notification.name(),
            include_str!("../templates/contact_notification.html"),
        )?;
        Ok(Self { env })
    }

    /// Render the HTML body of `template` for `contact`.
    pub fn render(
        &self,
        template: ContactTemplate,
        contact: &Contact,
        settings: &ContactMailSettings,
    ) -> Result<String, EmailError> {
        let message_lines: Vec<&str> = contact.message.lines().collect();
        let html = self.env.get_template(template.name())?.render(context! {
            name => &contact.name,
            email => &contact.email,
            subject => &contact.subject,
            message_lines => message_lines,
            submitted_at => contact.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            source => &contact.source,
            ip_address => &contact.ip_address,
            admin_url => settings.admin_url(),
            site_name => &settings.site_name,
        })?;
        Ok(html)
    }
}
