use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;
use crate::parser::parse_service;

/// String-keyed mapping used for environment variables and labels.
///
/// BTreeMap keeps the serialized template deterministic.
pub type Mapping = BTreeMap<String, Value>;

/// A parsed service description.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// The `service` name.
    pub service: String,
    /// Provider-wide defaults.
    pub provider: ProviderConfig,
    /// Packaging information.
    pub package: PackageConfig,
    /// Function declarations, in declaration order.
    pub functions: Vec<FunctionDeclaration>,
}

impl ServiceConfig {
    /// Load a service configuration from a YAML or JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a service configuration from YAML or JSON content.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        parse_service(content)
    }

    /// Look up a function declaration by name.
    pub fn function(&self, name: &str) -> Option<&FunctionDeclaration> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// All function names, in declaration order.
    pub fn function_names(&self) -> Vec<&str> {
        self.functions.iter().map(|f| f.name.as_str()).collect()
    }
}

/// The `provider` section: defaults applied to every function.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    /// Provider name (e.g. "google").
    #[serde(default)]
    pub name: Option<String>,
    /// Cloud project id.
    #[serde(default)]
    pub project: Option<String>,
    pub region: Option<String>,
    pub runtime: Option<String>,
    pub memory_size: Option<u32>,
    /// Function timeout as a duration string (e.g. "60s"). A bare number
    /// of seconds is read as `"<n>s"`.
    #[serde(default, alias = "timeoutSeconds", deserialize_with = "duration")]
    pub timeout: Option<String>,
    #[serde(default)]
    pub environment: Mapping,
    #[serde(default)]
    pub labels: Mapping,
    /// Bucket receiving the deployment artifact.
    pub deployment_bucket_name: Option<String>,
}

/// The `package` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageConfig {
    /// Local path of the packaged artifact (e.g. ".serverless/my-service.zip").
    pub artifact: Option<String>,
    /// Directory inside the deployment bucket that holds the artifact.
    pub artifact_directory_name: Option<String>,
}

/// One function entry under `functions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDeclaration {
    /// Function name. Filled from the mapping key when not given explicitly.
    #[serde(default)]
    pub name: String,
    pub handler: Option<String>,
    pub events: Option<Vec<RawEvent>>,
    pub memory_size: Option<u32>,
    pub location: Option<String>,
    pub runtime: Option<String>,
    #[serde(default, alias = "timeoutSeconds", deserialize_with = "duration")]
    pub timeout: Option<String>,
    #[serde(default)]
    pub environment: Mapping,
    #[serde(default)]
    pub labels: Mapping,
}

impl FunctionDeclaration {
    /// Create a declaration with a handler and no events.
    pub fn new(name: impl Into<String>, handler: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handler: Some(handler.into()),
            ..Default::default()
        }
    }

    /// Append an event entry.
    pub fn with_event(mut self, event: RawEvent) -> Self {
        self.events.get_or_insert_with(Vec::new).push(event);
        self
    }
}

/// An `events` entry exactly as written in the configuration.
///
/// Kept untyped so that unknown or malformed triggers reach the compiler,
/// which reports them with the owning function's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawEvent(pub Value);

impl RawEvent {
    /// An `http` trigger entry.
    pub fn http(url: impl Into<String>) -> Self {
        Self(serde_json::json!({ "http": url.into() }))
    }

    /// An `event` trigger entry.
    pub fn event(
        event_type: impl Into<String>,
        resource: impl Into<String>,
        path: Option<&str>,
    ) -> Self {
        let mut body = serde_json::Map::new();
        body.insert("eventType".into(), Value::String(event_type.into()));
        body.insert("resource".into(), Value::String(resource.into()));
        if let Some(path) = path {
            body.insert("path".into(), Value::String(path.to_string()));
        }
        Self(serde_json::json!({ "event": body }))
    }

    /// The trigger tag (the first key of the entry), if the entry is a mapping.
    pub fn tag(&self) -> Option<&str> {
        self.0.as_object()?.keys().next().map(String::as_str)
    }
}

/// Read a timeout given either as a duration string or as whole seconds.
fn duration<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Duration {
        Seconds(u64),
        Text(String),
    }

    Ok(
        Option::<Duration>::deserialize(deserializer)?.map(|d| match d {
            Duration::Seconds(n) => format!("{}s", n),
            Duration::Text(s) => s,
        }),
    )
}
