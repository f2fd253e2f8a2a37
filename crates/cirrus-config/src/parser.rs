use serde_yaml::{Mapping as YamlMapping, Value};

use super::error::ConfigError;
use super::model::{FunctionDeclaration, PackageConfig, ProviderConfig, ServiceConfig};

/// Parse a service description from a YAML/JSON string.
///
/// The document is read as `serde_yaml::Value` first so the `functions`
/// mapping keeps its declaration order.
pub fn parse_service(input: &str) -> Result<ServiceConfig, ConfigError> {
    // JSON is valid YAML
    let root: Value = serde_yaml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;

    let root = root
        .as_mapping()
        .ok_or_else(|| ConfigError::Invalid("service root must be a mapping".into()))?;

    let service = match root.get("service") {
        Some(value) => parse_service_name(value)?,
        None => String::new(),
    };

    let provider: ProviderConfig = section(root, "provider")?;
    let package: PackageConfig = section(root, "package")?;
    let functions = match root.get("functions") {
        Some(Value::Null) | None => Vec::new(),
        Some(Value::Mapping(functions)) => parse_functions(functions)?,
        Some(_) => {
            return Err(ConfigError::Invalid(
                "'functions' must be a mapping of name to declaration".into(),
            ))
        }
    };

    Ok(ServiceConfig {
        service,
        provider,
        package,
        functions,
    })
}

/// `service` is either a plain string or a mapping with a `name` key.
fn parse_service_name(value: &Value) -> Result<String, ConfigError> {
    match value {
        Value::String(name) => Ok(name.clone()),
        Value::Mapping(obj) => obj
            .get("name")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| ConfigError::Invalid("missing 'service.name'".into())),
        _ => Err(ConfigError::Invalid(
            "'service' must be a string or a mapping".into(),
        )),
    }
}

/// Deserialize an optional top-level section, defaulting when absent or null.
fn section<T>(root: &YamlMapping, key: &str) -> Result<T, ConfigError>
where
    T: serde::de::DeserializeOwned + Default,
{
    match root.get(key) {
        Some(Value::Null) | None => Ok(T::default()),
        Some(value) => serde_yaml::from_value(value.clone())
            .map_err(|e| ConfigError::Invalid(format!("'{}': {}", key, e))),
    }
}

fn parse_functions(functions: &YamlMapping) -> Result<Vec<FunctionDeclaration>, ConfigError> {
    let mut parsed = Vec::with_capacity(functions.len());

    for (key, value) in functions {
        let key = key
            .as_str()
            .ok_or_else(|| ConfigError::Invalid("function names must be strings".into()))?;

        // A bare key (`hello:` with no body) is a declaration with nothing set
        let mut decl: FunctionDeclaration = match value {
            Value::Null => FunctionDeclaration::default(),
            Value::Mapping(_) => serde_yaml::from_value(value.clone())
                .map_err(|e| ConfigError::Invalid(format!("function '{}': {}", key, e)))?,
            _ => {
                return Err(ConfigError::Invalid(format!(
                    "function '{}' must be a mapping",
                    key
                )))
            }
        };

        if decl.name.is_empty() {
            decl.name = key.to_string();
        }
        parsed.push(decl);
    }

    Ok(parsed)
}
