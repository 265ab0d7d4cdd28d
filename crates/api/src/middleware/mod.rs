//! Request extractors for authentication, authorization and client metadata.
//!
//! - [`auth::AuthUser`] -- The user behind a valid JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the `ADMIN` or `SUPERADMIN` role.
//! - [`client::ClientMeta`] -- Requester IP address and user agent.

pub mod auth;
pub mod client;
pub mod rbac;
