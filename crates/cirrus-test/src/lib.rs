//! Test harnesses for Cirrus.
//!
//! Provides shared fixture lookup and `TestService`, a service description
//! written to a temporary directory, for CLI and compiler integration tests.

#[cfg(test)]
pub mod cli;
pub mod service;

pub use service::{fixture, fixtures_dir, TestService};
