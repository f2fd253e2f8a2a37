//! Structured logging to stderr.

use std::io::IsTerminal;

use crate::{LogFormat, TelemetryConfig, TelemetryError};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the logging subsystem.
///
/// Sets up tracing-subscriber with either JSON or pretty format,
/// respecting the configured log level.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    // Build the env filter from config or RUST_LOG
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    match config.log_format {
        LogFormat::Json => init_json_logging(filter),
        LogFormat::Pretty => init_pretty_logging(filter),
    }
}

/// JSON lines, one object per event.
fn init_json_logging(filter: EnvFilter) -> Result<(), TelemetryError> {
    let json_layer = fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_current_span(true)
        .with_span_list(false)
        .with_file(false)
        .with_line_number(false)
        .flatten_event(true)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(json_layer)
        .try_init()
        .map_err(|e: tracing_subscriber::util::TryInitError| {
            TelemetryError::LoggingInit(e.to_string())
        })
}

/// Single-line human-readable output for interactive use.
fn init_pretty_logging(filter: EnvFilter) -> Result<(), TelemetryError> {
    let pretty_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(pretty_layer)
        .try_init()
        .map_err(|e: tracing_subscriber::util::TryInitError| {
            TelemetryError::LoggingInit(e.to_string())
        })
}

/// Standard log event names.
pub mod events {
    /// A compile or validate run has started.
    pub const COMPILE_STARTED: &str = "compile_started";

    /// One function resource was added to the template.
    pub const FUNCTION_COMPILED: &str = "function_compiled";

    /// A compile or validate run produced its template.
    pub const COMPILE_FINISHED: &str = "compile_finished";

    /// A compile or validate run stopped on an error.
    pub const COMPILE_FAILED: &str = "compile_failed";

    /// The compiled template was written out.
    pub const TEMPLATE_WRITTEN: &str = "template_written";
}

/// Helper macros for structured logging with standard fields.
///
/// These wrap the tracing macros to ensure consistent field naming.
#[macro_export]
macro_rules! log_compile_started {
    ($($field:tt)*) => {
        tracing::info!(
            event = $crate::logging::events::COMPILE_STARTED,
            $($field)*
        )
    };
}

#[macro_export]
macro_rules! log_function_compiled {
    ($($field:tt)*) => {
        tracing::info!(
            event = $crate::logging::events::FUNCTION_COMPILED,
            $($field)*
        )
    };
}

#[macro_export]
macro_rules! log_compile_finished {
    ($($field:tt)*) => {
        tracing::info!(
            event = $crate::logging::events::COMPILE_FINISHED,
            $($field)*
        )
    };
}

#[macro_export]
macro_rules! log_template_written {
    ($($field:tt)*) => {
        tracing::info!(
            event = $crate::logging::events::TEMPLATE_WRITTEN,
            $($field)*
        )
    };
}

#[macro_export]
macro_rules! log_compile_failed {
    ($($field:tt)*) => {
        tracing::error!(
            event = $crate::logging::events::COMPILE_FAILED,
            $($field)*
        )
    };
}
