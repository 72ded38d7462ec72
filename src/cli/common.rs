//! Helpers shared by commands.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::ProjectConfig;

/// A loaded project: its root directory and parsed configuration.
pub struct Project {
    pub root: PathBuf,
    pub config: ProjectConfig,
}

impl Project {
    /// Load `config_path`, or `sharegen.toml` from the current directory.
    ///
    /// The project root is the directory holding the configuration file.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let current_dir = std::env::current_dir()?;
        let path = match config_path {
            Some(path) => current_dir.join(path),
            None => ProjectConfig::find(&current_dir)?,
        };

        let config = ProjectConfig::load(&path)?;
        let root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => current_dir,
        };

        Ok(Self {
            root,
            config,
        })
    }
}
