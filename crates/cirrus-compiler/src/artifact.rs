//! Packaging references for compiled functions.

use std::path::Path;

use cirrus_config::{PackageConfig, ProviderConfig};

use crate::error::CompileError;

/// Path of the artifact inside the deployment bucket:
/// `<artifactDirectoryName>/<file name of package.artifact>`.
pub fn artifact_file_path(package: &PackageConfig) -> Result<String, CompileError> {
    let artifact = package
        .artifact
        .as_deref()
        .filter(|a| !a.is_empty())
        .ok_or_else(|| CompileError::MissingArtifact("'package.artifact' not set".into()))?;

    let file_name = Path::new(artifact)
        .file_name()
        .and_then(|f| f.to_str())
        .ok_or_else(|| {
            CompileError::MissingArtifact(format!("'{}' has no file name", artifact))
        })?;

    let directory = package
        .artifact_directory_name
        .as_deref()
        .filter(|d| !d.is_empty())
        .ok_or_else(|| {
            CompileError::MissingArtifact("'package.artifactDirectoryName' not set".into())
        })?;

    Ok(format!("{}/{}", directory, file_name))
}

/// `gs://<deploymentBucketName>/<artifactFilePath>`
pub fn source_archive_url(
    provider: &ProviderConfig,
    artifact_file_path: &str,
) -> Result<String, CompileError> {
    let bucket = provider
        .deployment_bucket_name
        .as_deref()
        .filter(|b| !b.is_empty())
        .ok_or(CompileError::MissingDeploymentBucket)?;

    Ok(format!("gs://{}/{}", bucket, artifact_file_path))
}
