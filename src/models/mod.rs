//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod submission;
pub mod technology;
pub mod listing;
pub mod pagination;

// Re-export commonly used models
pub use submission::{Submission, SubmissionRow, CreateSubmissionRequest, NewSubmission};
pub use technology::{Technology, CreateTechnologyRequest, SearchTechnologiesRequest, SearchTechnologiesResponse, ListTechnologiesRequest};
pub use listing::{ListSubmissionsRequest, SubmissionFilter, SubmissionQuery, SubmissionSort, SortDirection};
pub use pagination::{Page, PageRequest};
