use std::sync::Arc;

use showcase_mail::ContactMailer;
use tokio_util::task::TaskTracker;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: showcase_db::DbPool,
    /// Server configuration (JWT settings, upload limits, mail delivery mode).
    pub config: Arc<ServerConfig>,
    /// Contact-form email dispatcher.
    pub mailer: Arc<ContactMailer>,
    /// Background contact-mail sends, drained on shutdown.
    pub mail_tasks: TaskTracker,
}
