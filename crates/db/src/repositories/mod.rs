//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod contact_repo;
pub mod portfolio_repo;
pub mod service_repo;
pub mod user_repo;

pub use contact_repo::ContactRepo;
pub use portfolio_repo::PortfolioRepo;
pub use service_repo::ServiceRepo;
pub use user_repo::UserRepo;
