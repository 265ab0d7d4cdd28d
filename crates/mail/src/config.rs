//! Environment-driven mail configuration.

use std::time::Duration;

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default bound on one SMTP exchange (connect, greeting, send).
const DEFAULT_SMTP_TIMEOUT_SECS: u64 = 10;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@showcase.local";

/// Default public site URL used for admin-panel links.
const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";

/// Default site name shown in message bodies.
const DEFAULT_SITE_NAME: &str = "Showcase";

/// Configuration for the SMTP transport.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
    /// Per-command timeout handed to the SMTP client.
    pub smtp_timeout: Duration,
}

impl MailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured and should be skipped.
    ///
    /// | Variable            | Required | Default                   |
    /// |---------------------|----------|---------------------------|
    /// | `SMTP_HOST`         | yes      |                           |
    /// | `SMTP_PORT`         | no       | `587`                     |
    /// | `SMTP_FROM`         | no       | `noreply@showcase.local`  |
    /// | `SMTP_USER`         | no       |                           |
    /// | `SMTP_PASSWORD`     | no       |                           |
    /// | `SMTP_TIMEOUT_SECS` | no       | `10`                      |
    pub fn from_env() -> Option<Self> {
        let smtp_host = non_empty_var("SMTP_HOST")?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: non_empty_var("SMTP_FROM")
                .unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: non_empty_var("SMTP_USER"),
            smtp_password: non_empty_var("SMTP_PASSWORD"),
            smtp_timeout: Duration::from_secs(
                std::env::var("SMTP_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_SMTP_TIMEOUT_SECS),
            ),
        })
    }
}

/// Recipients and link targets for contact-form emails.
#[derive(Debug, Clone)]
pub struct ContactMailSettings {
    /// Operator inbox that receives every submission.
    pub inbox: Option<String>,
    /// Fixed extra recipient of a short notification.
    pub notify_email: Option<String>,
    /// Base URL of the public site; the admin link is `{frontend_url}/admin/contacts`.
    pub frontend_url: String,
    pub site_name: String,
}

impl Default for ContactMailSettings {
    fn default() -> Self {
        Self {
            inbox: None,
            notify_email: None,
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            site_name: DEFAULT_SITE_NAME.to_string(),
        }
    }
}

impl ContactMailSettings {
    /// Load settings from environment variables.
    ///
    /// | Variable               | Default                  |
    /// |------------------------|--------------------------|
    /// | `CONTACT_INBOX`        | `SMTP_USER`              |
    /// | `CONTACT_NOTIFY_EMAIL` | none (message skipped)   |
    /// | `FRONTEND_URL`         | `http://localhost:5173`  |
    /// | `SITE_NAME`            | `Showcase`               |
    pub fn from_env() -> Self {
        Self {
            inbox: non_empty_var("CONTACT_INBOX").or_else(|| non_empty_var("SMTP_USER")),
            notify_email: non_empty_var("CONTACT_NOTIFY_EMAIL"),
            frontend_url: non_empty_var("FRONTEND_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string()),
            site_name: non_empty_var("SITE_NAME")
                .unwrap_or_else(|| DEFAULT_SITE_NAME.to_string()),
        }
    }

    /// Link to the contact triage screen of the admin panel.
    pub fn admin_url(&self) -> String {
        format!("{}/admin/contacts", self.frontend_url)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_returns_none_without_smtp_host() {
        std::env::remove_var("SMTP_HOST");
        assert!(MailConfig::from_env().is_none());
    }

    #[test]
    fn admin_url_joins_frontend() {
        let settings = ContactMailSettings {
            frontend_url: "https://example.com".into(),
            ..Default::default()
        };
        assert_eq!(settings.admin_url(), "https://example.com/admin/contacts");
    }
}
