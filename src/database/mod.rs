//! Database module
//!
//! This module handles database connections, query construction and repositories

pub mod connection;
pub mod query;
pub mod repositories;
pub mod service;

// Re-export commonly used database components
pub use connection::{DatabasePool, create_pool, create_lazy_pool, run_migrations, health_check};
pub use repositories::{SubmissionRepository, TechnologyRepository, CreatedSubmission};
pub use service::DatabaseService;
