//! Service configuration model for Cirrus.
//!
//! Reads `serverless.yml` style service descriptions (YAML or JSON) into a
//! [`ServiceConfig`]: provider-wide defaults, packaging info and the function
//! declarations in the order they were written.

pub mod error;
pub mod model;
pub mod parser;

pub use error::ConfigError;
pub use model::{
    FunctionDeclaration, Mapping, PackageConfig, ProviderConfig, RawEvent, ServiceConfig,
};
pub use parser::parse_service;
