pub mod auth;
pub mod contact;
pub mod portfolio;
pub mod service;
