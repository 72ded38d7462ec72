//! Generic TOML parsing with file path context.
//!
//! ```rust,no_run
//! use sharegen_cli::config::parse_config;
//! use serde::Deserialize;
//! use std::path::Path;
//!
//! #[derive(Deserialize)]
//! struct Dist {
//!     name: String,
//!     version: String,
//! }
//!
//! # fn example() -> anyhow::Result<()> {
//! let dist: Dist = parse_config(Path::new("dist.toml"))?;
//! println!("{} {}", dist.name, dist.version);
//! # Ok(())
//! # }
//! ```
//!
//! Errors carry two levels of context, the operation and the file, with the
//! underlying I/O or TOML error preserved as the cause:
//!
//! ```text
//! Failed to parse config file: /path/to/sharegen.toml
//! Caused by:
//!     invalid type: integer `5`, expected a string
//! ```

use anyhow::{Context, Result};
use std::path::Path;

/// Parse a TOML file into `T`.
///
/// # Errors
///
/// Fails when the file cannot be read, is not valid TOML, or does not match
/// the shape of `T`.
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: T = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        use tempfile::tempdir;

        let temp = tempdir().unwrap();
        let config_path = temp.path().join("sharegen.toml");

        #[derive(serde::Deserialize)]
        struct TestConfig {
            name: String,
            build_dir: String,
        }

        let toml_content = r#"
            name = "Foo-Bar"
            build_dir = ".build"
        "#;

        std::fs::write(&config_path, toml_content).unwrap();

        let config: TestConfig = parse_config(&config_path).unwrap();
        assert_eq!(config.name, "Foo-Bar");
        assert_eq!(config.build_dir, ".build");
    }

    #[test]
    fn test_parse_config_error() {
        use tempfile::tempdir;

        let temp = tempdir().unwrap();
        let config_path = temp.path().join("invalid.toml");

        #[derive(serde::Deserialize)]
        struct TestConfig {
            #[allow(dead_code)]
            name: String,
        }

        std::fs::write(&config_path, "invalid = toml {").unwrap();

        let result: Result<TestConfig> = parse_config(&config_path);
        let message = format!("{:#}", result.err().unwrap());
        assert!(message.contains("Failed to parse config file"));
    }

    #[test]
    fn test_parse_config_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        let result: Result<toml::Table> = parse_config(&temp.path().join("missing.toml"));
        let message = format!("{:#}", result.err().unwrap());
        assert!(message.contains("Failed to read config file"));
    }
}
