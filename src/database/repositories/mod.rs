//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod submission;
pub mod technology;

// Re-export repositories
pub use submission::{SubmissionRepository, CreatedSubmission};
pub use technology::TechnologyRepository;
