//! HTTP handlers module
//!
//! This module contains the JSON API handlers organized by resource:
//! - Submission handlers for creating and browsing compensation reports
//! - Technology handlers for the tag catalogue and autocomplete
//! - Health handler for liveness and readiness checks

pub mod health;
pub mod submissions;
pub mod technologies;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use crate::utils::errors::SalaryBoardError;

// Extractor failures are client errors with the extractor's own explanation.

pub(crate) fn json_rejection(rejection: JsonRejection) -> SalaryBoardError {
    SalaryBoardError::InvalidInput(rejection.body_text())
}

pub(crate) fn query_rejection(rejection: QueryRejection) -> SalaryBoardError {
    SalaryBoardError::InvalidInput(rejection.body_text())
}

pub(crate) fn path_rejection(rejection: PathRejection) -> SalaryBoardError {
    SalaryBoardError::InvalidInput(rejection.body_text())
}
