//! Sample `sharegen.toml` contents.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE_NAME;

/// A named `sharegen.toml` body.
#[derive(Clone, Debug)]
pub struct ConfigFixture {
    pub name: String,
    pub content: String,
}

impl ConfigFixture {
    /// Renders `Foo-Bar/tmpl.txt` into `out/gen.txt` with `key1 = "hello"`.
    pub fn basic() -> Self {
        Self {
            name: "basic".to_string(),
            content: r#"
[dist]
name = "My-Dist"
version = "1.0.0"

[share]
paths = ["../shares"]

[[generate]]
dist = "Foo-Bar"
source_filename = "tmpl.txt"
destination_filename = "out/gen.txt"
encoding = "UTF-8"
key1 = "hello"
"#
            .trim_start()
            .to_string(),
        }
    }

    /// Entry without a destination filename.
    pub fn missing_destination() -> Self {
        Self {
            name: "missing_destination".to_string(),
            content: r#"
[dist]
name = "My-Dist"

[share]
paths = ["../shares"]

[[generate]]
dist = "Foo-Bar"
source_filename = "tmpl.txt"
"#
            .trim_start()
            .to_string(),
        }
    }

    /// Write as `sharegen.toml` into `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(CONFIG_FILE_NAME);
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write fixture '{}'", self.name))?;
        Ok(path)
    }
}
