//! Logging infrastructure for Cirrus.
//!
//! Structured logs go to stderr, either as JSON lines or in a human-readable
//! format, so that stdout stays free for compiled templates.
//!
//! # Usage
//!
//! ```ignore
//! use cirrus_telemetry::{LogFormat, TelemetryConfig};
//!
//! let config = TelemetryConfig::new()
//!     .with_log_level("debug")
//!     .with_log_format(LogFormat::Pretty);
//!
//! cirrus_telemetry::init(&config)?;
//! ```

pub mod config;
pub mod logging;

pub use config::{LogFormat, TelemetryConfig};
pub use logging::events;

use thiserror::Error;

/// Telemetry errors.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Failed to initialize logging.
    #[error("failed to initialize logging: {0}")]
    LoggingInit(String),
}

/// Initialize logging with the given configuration.
///
/// Fails if a global subscriber is already installed.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    logging::init_logging(config)
}
