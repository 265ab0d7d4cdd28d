#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tokio::sync::Semaphore;
use tokio_util::task::TaskTracker;
use tower::ServiceExt;

use showcase_api::auth::jwt::JwtConfig;
use showcase_api::auth::password::hash_password;
use showcase_api::config::{MailDelivery, ServerConfig};
use showcase_api::router::build_app_router;
use showcase_api::state::AppState;
use showcase_db::models::user::{CreateUser, User};
use showcase_db::repositories::UserRepo;
use showcase_mail::{ContactMailSettings, ContactMailer, EmailError, MailTransport, OutgoingEmail};

pub const TEST_PASSWORD: &str = "test_password_123!";
pub const MAX_UPLOAD_BYTES: usize = 64 * 1024;

// ---------------------------------------------------------------------------
// Mail transports
// ---------------------------------------------------------------------------

/// Records every message instead of sending it.
#[derive(Default)]
pub struct RecordingTransport {
    pub sent: Mutex<Vec<OutgoingEmail>>,
}

impl RecordingTransport {
    pub fn recipients(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|e| e.to.clone()).collect()
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// Simulates an unreachable SMTP relay.
#[derive(Default)]
pub struct FailingTransport {
    pub attempts: Mutex<usize>,
}

#[async_trait]
impl MailTransport for FailingTransport {
    async fn send(&self, _email: &OutgoingEmail) -> Result<(), EmailError> {
        *self.attempts.lock().unwrap() += 1;
        Err(EmailError::Build("connection refused".into()))
    }
}

/// A relay that answers slowly and then fails.
pub struct SlowTransport {
    pub delay: Duration,
}

#[async_trait]
impl MailTransport for SlowTransport {
    async fn send(&self, _email: &OutgoingEmail) -> Result<(), EmailError> {
        tokio::time::sleep(self.delay).await;
        Err(EmailError::Build("relay timed out".into()))
    }
}

/// Holds every send until [`GatedTransport::open`] is called, then records it.
pub struct GatedTransport {
    gate: Semaphore,
    pub inner: RecordingTransport,
}

impl Default for GatedTransport {
    fn default() -> Self {
        Self {
            gate: Semaphore::new(0),
            inner: RecordingTransport::default(),
        }
    }
}

impl GatedTransport {
    pub fn open(&self) {
        self.gate.add_permits(1);
    }

    pub fn recipients(&self) -> Vec<String> {
        self.inner.recipients()
    }
}

#[async_trait]
impl MailTransport for GatedTransport {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| EmailError::Build(e.to_string()))?;
        self.inner.send(email).await
    }
}

pub fn mail_settings() -> ContactMailSettings {
    ContactMailSettings {
        inbox: Some("inbox@example.com".into()),
        notify_email: Some("owner@example.com".into()),
        frontend_url: "https://example.com".into(),
        site_name: "Showcase".into(),
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig`. Mail is sent inline so tests can observe it.
pub fn test_config(upload_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough-for-hmac".to_string(),
            expiry_hours: 1,
        },
        upload_dir,
        max_upload_bytes: MAX_UPLOAD_BYTES,
        mail_delivery: MailDelivery::Inline,
    }
}

/// The full router plus the resources it was built with.
pub struct TestApp {
    pub router: Router,
    pub config: ServerConfig,
    pub upload_dir: TempDir,
    /// Background mail sends spawned by the router.
    pub mail_tasks: TaskTracker,
}

impl TestApp {
    /// A fresh handle on the router for one `oneshot` request.
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// Build the application with the given mail transport and a config
/// adjusted by `configure`.
pub fn build_test_app_configured(
    pool: PgPool,
    transport: Arc<dyn MailTransport>,
    configure: impl FnOnce(&mut ServerConfig),
) -> TestApp {
    let upload_dir = tempfile::tempdir().expect("tempdir should be created");
    let mut config = test_config(upload_dir.path().to_path_buf());
    configure(&mut config);
    let mailer = ContactMailer::new(transport, mail_settings()).expect("templates should load");
    let mail_tasks = TaskTracker::new();

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        mailer: Arc::new(mailer),
        mail_tasks: mail_tasks.clone(),
    };
    let router = build_app_router(state, &config);

    TestApp {
        router,
        config,
        upload_dir,
        mail_tasks,
    }
}

/// Build the application with the given mail transport.
pub fn build_test_app_with_transport(pool: PgPool, transport: Arc<dyn MailTransport>) -> TestApp {
    build_test_app_configured(pool, transport, |_| {})
}

/// Build the application with a recording mail transport.
pub fn build_test_app(pool: PgPool) -> TestApp {
    build_test_app_with_transport(pool, Arc::new(RecordingTransport::default()))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Insert a user with [`TEST_PASSWORD`].
pub async fn create_user(pool: &PgPool, email: &str, role: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
            role: role.to_string(),
        },
    )
    .await
    .expect("user creation should succeed")
}

/// Log in through the API and return the bearer token.
pub async fn login_token(app: Router, email: &str, password: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK, "login should succeed");
    let json = body_json(response).await;
    json["token"].as_str().expect("token").to_string()
}

/// Create an admin and return a token for it.
pub async fn admin_token(pool: &PgPool, app: Router) -> String {
    create_user(pool, "admin@example.com", "ADMIN").await;
    login_token(app, "admin@example.com", TEST_PASSWORD).await
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Multipart
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "----showcase-test-boundary";

/// An image part for [`multipart_auth`].
pub struct FilePart<'a> {
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub data: &'a [u8],
}

fn multipart_body(fields: &[(&str, &str)], file: Option<FilePart<'_>>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(file) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; \
                 filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                file.file_name, file.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(file.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Send a `multipart/form-data` request with text fields and an optional image.
pub async fn multipart_auth(
    app: Router,
    method: Method,
    uri: &str,
    token: &str,
    fields: &[(&str, &str)],
    file: Option<FilePart<'_>>,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(fields, file)))
        .unwrap();
    send(app, request).await
}
