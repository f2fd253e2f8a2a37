use thiserror::Error;

/// Errors produced during compilation.
///
/// Every variant aborts the whole run. Templates already appended for
/// earlier functions are left in place.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The service configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] cirrus_config::ConfigError),

    /// Function declares no handler.
    #[error(
        "Missing \"handler\" property for function \"{function}\". \
         Your function needs a \"handler\". Please check the docs for more info."
    )]
    MissingHandler { function: String },

    /// Function declares no events.
    #[error(
        "Missing \"events\" property for function \"{function}\". \
         Your function needs at least one \"event\". Please check the docs for more info."
    )]
    MissingEvents { function: String },

    /// Function declares more than one event.
    #[error(
        "The function \"{function}\" has more than one event ({count}). \
         Only one event per function is supported. Please check the docs for more info."
    )]
    TooManyEvents { function: String, count: usize },

    /// Event tag is not one of [`SUPPORTED_EVENT_TYPES`](crate::SUPPORTED_EVENT_TYPES).
    #[error(
        "Event type \"{event_type}\" of function \"{function}\" not supported. \
         supported event types are: {supported}",
        supported = crate::event::SUPPORTED_EVENT_TYPES.join(", ")
    )]
    UnsupportedEventType { function: String, event_type: String },

    /// Event entry has a recognised tag but a malformed body.
    #[error("Invalid event for function \"{function}\": {reason}")]
    InvalidEvent { function: String, reason: String },

    /// Two declarations share a name.
    #[error("Duplicate function name \"{0}\"")]
    DuplicateFunction(String),

    /// Package artifact path is missing or has no file name.
    #[error("Invalid package artifact: {0}")]
    MissingArtifact(String),

    /// Provider declares no deployment bucket.
    #[error("Missing \"deploymentBucketName\" in provider configuration")]
    MissingDeploymentBucket,

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CompileError {
    /// Name of the function that failed validation, if any.
    pub fn function(&self) -> Option<&str> {
        match self {
            CompileError::MissingHandler { function }
            | CompileError::MissingEvents { function }
            | CompileError::TooManyEvents { function, .. }
            | CompileError::UnsupportedEventType { function, .. }
            | CompileError::InvalidEvent { function, .. } => Some(function),
            CompileError::DuplicateFunction(name) => Some(name),
            CompileError::Config(_)
            | CompileError::MissingArtifact(_)
            | CompileError::MissingDeploymentBucket
            | CompileError::Json(_)
            | CompileError::Yaml(_) => None,
        }
    }
}
