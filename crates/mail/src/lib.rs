//! Contact notification emails.
//!
//! [`ContactMailer`] renders the HTML messages sent when a visitor submits
//! the contact form and hands them to a [`MailTransport`]. The production
//! transport is [`SmtpMailTransport`]; when `SMTP_HOST` is unset the mailer
//! is built without a transport and every send is logged and skipped.

pub mod config;
pub mod error;
pub mod notifier;
pub mod templates;
pub mod transport;

pub use config::{ContactMailSettings, MailConfig};
pub use error::EmailError;
pub use notifier::{ContactMailer, DispatchReport};
pub use transport::{MailTransport, OutgoingEmail, SmtpMailTransport};
