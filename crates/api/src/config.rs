use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use showcase_core::upload::DEFAULT_MAX_UPLOAD_BYTES;

use crate::auth::jwt::JwtConfig;

/// When contact-form emails are sent relative to the HTTP response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MailDelivery {
    /// Spawn the sends after the row is stored; respond immediately.
    #[default]
    Background,
    /// Await the sends before responding, bounded by
    /// [`ServerConfig::inline_mail_budget`].
    Inline,
}

impl FromStr for MailDelivery {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "background" => Ok(MailDelivery::Background),
            "inline" => Ok(MailDelivery::Inline),
            other => Err(format!(
                "Unknown mail delivery mode '{other}' (expected 'background' or 'inline')"
            )),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Directory uploaded images are written to and served from.
    pub upload_dir: PathBuf,
    /// Maximum accepted size of one uploaded image.
    pub max_upload_bytes: usize,
    pub mail_delivery: MailDelivery,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `5000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `UPLOAD_DIR`            | `uploads`               |
    /// | `MAX_UPLOAD_BYTES`      | `5242880`               |
    /// | `CONTACT_MAIL_DELIVERY` | `background`            |
    ///
    /// # Panics
    ///
    /// Panics on malformed numeric values or an unknown delivery mode, and
    /// when `JWT_SECRET` is missing (see [`JwtConfig::from_env`]).
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let upload_dir =
            PathBuf::from(std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()));

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .map(|v| v.parse().expect("MAX_UPLOAD_BYTES must be a valid usize"))
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        let mail_delivery: MailDelivery = std::env::var("CONTACT_MAIL_DELIVERY")
            .map(|v| v.parse().unwrap_or_else(|e: String| panic!("{e}")))
            .unwrap_or_default();

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            upload_dir,
            max_upload_bytes,
            mail_delivery,
        }
    }

    /// How long an inline contact submission may wait on its emails.
    ///
    /// Half the request timeout, so the stored submission is acknowledged
    /// before the timeout layer answers 408.
    pub fn inline_mail_budget(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs) / 2
    }
}
