//! Row structs and write DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - The DTOs its repository accepts for inserts and updates

pub mod contact;
pub mod portfolio;
pub mod service;
pub mod user;
