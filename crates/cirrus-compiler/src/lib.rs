//! Compiles serverless service descriptions into Cloud Functions resource templates.
//!
//! Validates each function declaration, resolves runtime settings against
//! provider defaults, binds the declared trigger and points the function at
//! the packaged artifact in the deployment bucket.

pub mod artifact;
pub mod compiler;
pub mod defaults;
pub mod error;
pub mod event;
pub mod template;

pub use artifact::{artifact_file_path, source_archive_url};
pub use compiler::{compile, compile_function, compile_into, validate_function, Compilation};
pub use defaults::{resolve, Truthy};
pub use error::CompileError;
pub use event::{EventSpec, SUPPORTED_EVENT_TYPES};
pub use template::{
    CompiledTemplate, EventTrigger, FunctionProperties, HttpsTrigger, ResourceTemplate, Trigger,
    FUNCTION_RESOURCE_TYPE,
};

// Re-export the configuration model so callers need a single dependency
pub use cirrus_config::{
    ConfigError, FunctionDeclaration, PackageConfig, ProviderConfig, RawEvent, ServiceConfig,
};
