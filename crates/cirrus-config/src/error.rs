use thiserror::Error;

/// Errors produced while loading a service configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML/JSON parse error.
    #[error("parse error: {0}")]
    Parse(String),

    /// The document parsed but does not describe a service.
    #[error("invalid service configuration: {0}")]
    Invalid(String),

    /// I/O error reading the configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
