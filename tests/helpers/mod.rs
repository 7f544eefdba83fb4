//! Test helpers module
//!
//! This module provides utilities and helpers for testing the SalaryBoard application.
//! It includes database setup, an in-process HTTP server, and test data builders.

#![allow(dead_code)]

pub mod database_helper;
pub mod test_data;
pub mod test_server;

pub use database_helper::*;
pub use test_data::*;
pub use test_server::*;
