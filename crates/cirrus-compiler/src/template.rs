//! Compiled resource templates.

use cirrus_config::Mapping;
use serde::{Deserialize, Serialize};

use crate::error::CompileError;

/// Resource kind of every compiled function.
pub const FUNCTION_RESOURCE_TYPE: &str = "cloudfunctions.v1beta2.function";

/// The caller-owned deployment template that compiled functions are appended to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompiledTemplate {
    #[serde(default)]
    pub resources: Vec<ResourceTemplate>,
}

impl CompiledTemplate {
    /// Create an empty template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a resource by name.
    pub fn resource(&self, name: &str) -> Option<&ResourceTemplate> {
        self.resources.iter().find(|r| r.name == name)
    }

    /// Serialize as YAML (deployment template format).
    pub fn to_yaml(&self) -> Result<String, CompileError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, CompileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One deployable function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceTemplate {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub name: String,
    pub properties: FunctionProperties,
}

/// `properties` of a function resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionProperties {
    pub location: String,
    pub available_memory_mb: u32,
    pub runtime: String,
    pub timeout_seconds: String,
    pub function: String,
    /// `gs://<bucket>/<artifactFilePath>`
    pub source_archive_url: String,
    /// Omitted entirely when no variables are set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_variables: Option<Mapping>,
    #[serde(default)]
    pub labels: Mapping,
    #[serde(flatten)]
    pub trigger: Trigger,
}

/// Exactly one trigger per function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    #[serde(rename = "httpsTrigger")]
    Https(HttpsTrigger),
    #[serde(rename = "eventTrigger")]
    Event(EventTrigger),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpsTrigger {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTrigger {
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub resource: String,
}
