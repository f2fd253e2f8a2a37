use std::collections::HashSet;

use cirrus_config::{FunctionDeclaration, ProviderConfig, ServiceConfig};
use tracing::{debug, info};

use crate::artifact::{artifact_file_path, source_archive_url};
use crate::defaults::{
    resolve, DEFAULT_LOCATION, DEFAULT_MEMORY_MB, DEFAULT_RUNTIME, DEFAULT_TIMEOUT,
};
use crate::error::CompileError;
use crate::event::EventSpec;
use crate::template::{
    CompiledTemplate, FunctionProperties, ResourceTemplate, FUNCTION_RESOURCE_TYPE,
};

/// Result of compiling a whole service.
#[derive(Debug, Clone)]
pub struct Compilation {
    /// Artifact path inside the deployment bucket (`<directory>/<file>`).
    pub artifact_file_path: String,
    /// One resource per function, in declaration order.
    pub template: CompiledTemplate,
}

/// Compile every function of `config` into a fresh template.
pub fn compile(config: &ServiceConfig) -> Result<Compilation, CompileError> {
    let mut template = CompiledTemplate::new();
    let artifact_file_path = compile_into(config, &mut template)?;
    Ok(Compilation {
        artifact_file_path,
        template,
    })
}

/// Compile every function of `config`, appending to `output.resources`.
///
/// Returns the derived artifact file path. Stops at the first invalid
/// declaration; resources appended for earlier functions stay in `output`.
pub fn compile_into(
    config: &ServiceConfig,
    output: &mut CompiledTemplate,
) -> Result<String, CompileError> {
    let artifact_file_path = artifact_file_path(&config.package)?;
    let source_archive_url = source_archive_url(&config.provider, &artifact_file_path)?;

    debug!(
        service = %config.service,
        functions = config.functions.len(),
        artifact = %artifact_file_path,
        "compiling service"
    );

    let mut seen = HashSet::with_capacity(config.functions.len());
    for decl in &config.functions {
        info!("Compiling function \"{}\"...", decl.name);

        if !seen.insert(decl.name.as_str()) {
            return Err(CompileError::DuplicateFunction(decl.name.clone()));
        }

        let resource = compile_function(decl, &config.provider, &source_archive_url)?;
        output.resources.push(resource);
    }

    Ok(artifact_file_path)
}

/// Check that a declaration has a handler and exactly one supported event.
pub fn validate_function(decl: &FunctionDeclaration) -> Result<EventSpec, CompileError> {
    if decl.handler.as_deref().unwrap_or_default().is_empty() {
        return Err(CompileError::MissingHandler {
            function: decl.name.clone(),
        });
    }

    let events = match decl.events.as_deref() {
        Some(events) if !events.is_empty() => events,
        _ => {
            return Err(CompileError::MissingEvents {
                function: decl.name.clone(),
            })
        }
    };

    if events.len() > 1 {
        return Err(CompileError::TooManyEvents {
            function: decl.name.clone(),
            count: events.len(),
        });
    }

    EventSpec::from_raw(&events[0], &decl.name)
}

/// Compile a single declaration against the provider defaults.
pub fn compile_function(
    decl: &FunctionDeclaration,
    provider: &ProviderConfig,
    source_archive_url: &str,
) -> Result<ResourceTemplate, CompileError> {
    let event = validate_function(decl)?;

    let available_memory_mb = resolve(
        decl.memory_size.as_ref(),
        provider.memory_size.as_ref(),
        &DEFAULT_MEMORY_MB,
    );
    let location = resolve(
        decl.location.as_deref(),
        provider.region.as_deref(),
        DEFAULT_LOCATION,
    );
    let runtime = resolve(
        decl.runtime.as_deref(),
        provider.runtime.as_deref(),
        DEFAULT_RUNTIME,
    );
    let timeout_seconds = resolve(
        decl.timeout.as_deref(),
        provider.timeout.as_deref(),
        DEFAULT_TIMEOUT,
    );

    let mut environment = provider.environment.clone();
    environment.extend(decl.environment.clone());

    let mut labels = provider.labels.clone();
    labels.extend(decl.labels.clone());

    debug!(
        function = %decl.name,
        trigger = event.tag(),
        runtime = %runtime,
        location = %location,
        "resolved function properties"
    );

    Ok(ResourceTemplate {
        resource_type: FUNCTION_RESOURCE_TYPE.to_string(),
        name: decl.name.clone(),
        properties: FunctionProperties {
            location,
            available_memory_mb,
            runtime,
            timeout_seconds,
            function: decl.name.clone(),
            source_archive_url: source_archive_url.to_string(),
            environment_variables: (!environment.is_empty()).then_some(environment),
            labels,
            trigger: event.to_trigger(),
        },
    })
}
