//! Service descriptions on disk for integration tests.

use std::path::{Path, PathBuf};

use cirrus_compiler::{compile, CompileError, CompiledTemplate, ServiceConfig};
use tempfile::TempDir;

/// Absolute path to the shared test fixtures directory.
pub fn fixtures_dir() -> PathBuf {
    // CARGO_MANIFEST_DIR = .../crates/cirrus-test
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("crates/")
        .parent()
        .expect("workspace root")
        .join("tests/fixtures")
}

/// Path of a named fixture file.
pub fn fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// A service description written into its own temporary directory.
pub struct TestService {
    dir: TempDir,
    path: PathBuf,
}

impl TestService {
    /// Write `yaml` as `serverless.yml` in a fresh temporary directory.
    pub fn from_yaml(yaml: &str) -> std::io::Result<Self> {
        let dir = TempDir::new()?;
        let path = dir.path().join("serverless.yml");
        std::fs::write(&path, yaml)?;
        Ok(Self { dir, path })
    }

    /// Path of the service file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A path inside the temporary directory, for output files.
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Load and compile the service through the library API.
    pub fn compile(&self) -> Result<CompiledTemplate, CompileError> {
        let config = ServiceConfig::load(&self.path)?;
        Ok(compile(&config)?.template)
    }
}
