//! Project configuration (`sharegen.toml`).
//!
//! ```toml
//! [dist]
//! name = "Foo-Bar"
//! version = "1.0.0"
//!
//! [share]
//! paths = ["vendor/share"]
//!
//! [[generate]]
//! destination_filename = "out/gen.txt"
//! source_filename = "tmpl.txt"
//! key1 = "hello"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::intake::RawPluginConfig;
use super::parser::parse_config;
use crate::build::{BuildSession, HostCapabilities};
use crate::core::SharegenError;
use crate::share::ShareDirLocator;

/// Name of the project configuration file
pub const CONFIG_FILE_NAME: &str = "sharegen.toml";

/// Directory holding the project's own share files, relative to the project root
pub const PROJECT_SHARE_DIR: &str = "share";

/// Default build output directory, relative to the project root
pub const DEFAULT_BUILD_DIR: &str = ".build";

/// Parsed `sharegen.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    pub dist: DistSection,
    #[serde(default)]
    pub share: ShareSection,
    /// One raw table per generation plugin instance, in declaration order
    #[serde(default)]
    pub generate: Vec<RawPluginConfig>,
}

/// `[dist]`: the distribution being built.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DistSection {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,
    /// The build driver encodes text files itself on write
    #[serde(default)]
    pub host_manages_encoding: bool,
}

/// `[share]`: where other distributions' share directories live.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShareSection {
    /// Search roots, each holding `<dist-name>/` directories
    #[serde(default)]
    pub paths: Vec<PathBuf>,
    /// Explicit share directory per distribution
    #[serde(default)]
    pub dists: BTreeMap<String, PathBuf>,
}

fn default_version() -> String {
    "0.0.0".to_string()
}

fn default_build_dir() -> PathBuf {
    PathBuf::from(DEFAULT_BUILD_DIR)
}

impl ProjectConfig {
    /// Load and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let config: Self = parse_config(path)?;
        tracing::debug!(
            "Loaded {} ({} generate entries)",
            path.display(),
            config.generate.len()
        );
        Ok(config)
    }

    /// Find the configuration file in `dir`.
    pub fn find(dir: &Path) -> Result<PathBuf> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Ok(path)
        } else {
            Err(SharegenError::ConfigError {
                message: format!("No {} found in {}", CONFIG_FILE_NAME, dir.display()),
            })
            .with_context(|| "Run sharegen from the project root or pass --config")
        }
    }

    #[must_use]
    pub fn capabilities(&self) -> HostCapabilities {
        HostCapabilities {
            manages_encoding: self.dist.host_manages_encoding,
        }
    }

    /// Build session for a project rooted at `root`.
    ///
    /// `build_dir` overrides `[dist].build_dir`; relative paths are taken
    /// from `root`.
    #[must_use]
    pub fn session(&self, root: &Path, build_dir: Option<&Path>) -> BuildSession {
        let build_dir = build_dir.unwrap_or(&self.dist.build_dir);
        BuildSession::new(&self.dist.name, &self.dist.version, root, root.join(build_dir))
            .with_capabilities(self.capabilities())
    }

    /// Share locator for a project rooted at `root`.
    ///
    /// The project's own `share/` directory serves its distribution name unless
    /// `[share.dists]` maps that name elsewhere. Configured search roots come
    /// before the environment and per-user roots.
    #[must_use]
    pub fn locator(&self, root: &Path) -> ShareDirLocator {
        let mut locator = ShareDirLocator::new();

        let own_share = root.join(PROJECT_SHARE_DIR);
        if !self.share.dists.contains_key(&self.dist.name) && own_share.is_dir() {
            locator = locator.with_dist_dir(&self.dist.name, own_share);
        }
        for (dist, dir) in &self.share.dists {
            locator = locator.with_dist_dir(dist, root.join(dir));
        }
        for path in &self.share.paths {
            locator = locator.with_search_root(root.join(path));
        }
        locator.with_default_roots()
    }

    /// Raw plugin tables paired with their instance names (`generate[<index>]`).
    pub fn plugin_tables(&self) -> impl Iterator<Item = (String, RawPluginConfig)> + '_ {
        self.generate
            .iter()
            .enumerate()
            .map(|(index, raw)| (format!("generate[{index}]"), raw.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_full_config() -> Result<()> {
        let temp = TempDir::new()?;
        let path = write_config(
            temp.path(),
            r#"
                [dist]
                name = "Foo-Bar"
                version = "1.2.3"
                build_dir = "out"
                host_manages_encoding = true

                [share]
                paths = ["vendor/share"]
                [share.dists]
                Other = "third_party/other"

                [[generate]]
                destination_filename = "a.txt"
                key1 = "hello"

                [[generate]]
                filename = "b.txt"
            "#,
        );

        let config = ProjectConfig::load(&path)?;
        assert_eq!(config.dist.name, "Foo-Bar");
        assert_eq!(config.dist.version, "1.2.3");
        assert!(config.capabilities().manages_encoding);
        assert_eq!(config.share.paths, vec![PathBuf::from("vendor/share")]);
        assert_eq!(config.generate.len(), 2);

        let names: Vec<String> = config.plugin_tables().map(|(name, _)| name).collect();
        assert_eq!(names, ["generate[0]", "generate[1]"]);

        let session = config.session(temp.path(), None);
        assert_eq!(session.build_root, temp.path().join("out"));
        let session = config.session(temp.path(), Some(Path::new("elsewhere")));
        assert_eq!(session.build_root, temp.path().join("elsewhere"));
        Ok(())
    }

    #[test]
    fn test_defaults() -> Result<()> {
        let temp = TempDir::new()?;
        let path = write_config(temp.path(), "[dist]\nname = \"Foo-Bar\"\n");

        let config = ProjectConfig::load(&path)?;
        assert_eq!(config.dist.version, "0.0.0");
        assert_eq!(config.dist.build_dir, PathBuf::from(DEFAULT_BUILD_DIR));
        assert!(!config.capabilities().manages_encoding);
        assert!(config.generate.is_empty());
        Ok(())
    }

    #[test]
    fn test_unknown_section_key_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), "[dist]\nname = \"x\"\nnmae = \"y\"\n");
        assert!(ProjectConfig::load(&path).is_err());
    }

    #[test]
    fn test_locator_uses_project_share_dir() -> Result<()> {
        let temp = TempDir::new()?;
        std::fs::create_dir_all(temp.path().join("share"))?;
        std::fs::write(temp.path().join("share/tmpl.txt"), "x")?;
        let path = write_config(temp.path(), "[dist]\nname = \"Foo-Bar\"\n");

        let config = ProjectConfig::load(&path)?;
        let locator = config.locator(temp.path());
        assert_eq!(locator.share_dir("Foo-Bar"), Some(temp.path().join("share")));
        Ok(())
    }

    #[test]
    fn test_find_missing_config() {
        let temp = TempDir::new().unwrap();
        let err = ProjectConfig::find(temp.path()).unwrap_err();
        assert!(format!("{err:#}").contains(CONFIG_FILE_NAME));
        assert!(matches!(
            err.downcast_ref::<SharegenError>(),
            Some(SharegenError::ConfigError { .. })
        ));
    }
}
