//! Domain rules shared by the persistence layer and the HTTP API.
//!
//! Nothing in this crate touches the database or the network: it holds the
//! enumerations, input validation, pagination arithmetic and authorization
//! rules that the other crates build on.

pub mod contact;
pub mod content;
pub mod error;
pub mod pagination;
pub mod roles;
pub mod types;
pub mod upload;
pub mod validation;
