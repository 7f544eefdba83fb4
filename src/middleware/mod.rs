//! Middleware module
//!
//! This module contains middleware for request processing

pub mod logging;
pub mod rate_limit;

// Re-export commonly used middleware
pub use logging::{log_requests, REQUEST_ID_HEADER};
pub use rate_limit::{rate_limit, RateLimiter};
