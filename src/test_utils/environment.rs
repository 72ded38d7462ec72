//! Temporary project layout for tests.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::fixtures::ConfigFixture;
use crate::config::CONFIG_FILE_NAME;

/// A project directory and a share search root, both inside one temp dir.
///
/// ```text
/// <tmp>/project/sharegen.toml
/// <tmp>/shares/<dist>/...
/// ```
///
/// Write configurations with `paths = ["../shares"]` (see
/// [`ConfigFixture`]) so the project finds the share root.
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub project_dir: PathBuf,
    pub shares_dir: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        super::init_test_logging(None);

        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().join("project");
        let shares_dir = temp_dir.path().join("shares");

        fs::create_dir_all(&project_dir)?;
        fs::create_dir_all(&shares_dir)?;

        Ok(Self {
            temp_dir,
            project_dir,
            shares_dir,
        })
    }

    /// Environment with the Foo-Bar template and a configuration rendering it.
    pub fn with_basic_project() -> Result<Self> {
        let env = Self::new()?;
        env.add_share_file("Foo-Bar", "tmpl.txt", b"Value: {{ $key1 }}")?;
        ConfigFixture::basic().write_to(&env.project_dir)?;
        Ok(env)
    }

    pub fn project_path(&self) -> &Path {
        &self.project_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.project_dir.join(CONFIG_FILE_NAME)
    }

    /// Write `sharegen.toml` into the project.
    pub fn write_config(&self, content: &str) -> Result<PathBuf> {
        self.create_file(CONFIG_FILE_NAME, content)
    }

    /// Place a file in the share directory of `dist`.
    pub fn add_share_file(&self, dist: &str, relative: &str, content: &[u8]) -> Result<PathBuf> {
        let path = self.shares_dir.join(dist).join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write share file: {}", path.display()))?;
        Ok(path)
    }

    /// Create a file below the project directory.
    pub fn create_file(&self, path: impl AsRef<Path>, content: &str) -> Result<PathBuf> {
        let full_path = self.project_dir.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full_path, content)
            .with_context(|| format!("Failed to write file: {}", full_path.display()))?;
        Ok(full_path)
    }

    /// Read a file below the project directory.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let full_path = self.project_dir.join(path);
        fs::read_to_string(&full_path)
            .with_context(|| format!("Failed to read file: {}", full_path.display()))
    }

    pub fn file_exists(&self, path: impl AsRef<Path>) -> bool {
        self.project_dir.join(path).exists()
    }
}
