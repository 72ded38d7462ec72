//! Registry of build files, in insertion order.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::file::BuildFile;
use crate::core::SharegenError;
use crate::utils::fs::atomic_write;

/// Ordered collection of the files making up a build.
///
/// Names are unique. Iteration follows registration order, which is the order
/// the munge phase and the writer visit files in.
#[derive(Debug, Default)]
pub struct FileRegistry {
    files: Vec<BuildFile>,
}

impl FileRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file. Fails if a file with the same name already exists.
    pub fn add(&mut self, file: BuildFile) -> Result<(), SharegenError> {
        if let Some(existing) = self.get(&file.name) {
            return Err(SharegenError::DuplicateFile {
                name: file.name,
                existing: existing.added_by.clone(),
            });
        }
        tracing::debug!("Registered build file '{}' (added by {})", file.name, file.added_by);
        self.files.push(file);
        Ok(())
    }

    /// Look up a file by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BuildFile> {
        self.files.iter().find(|f| f.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuildFile> {
        self.files.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut BuildFile> {
        self.files.iter_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Write every file below `root`, returning the paths written.
    pub fn write_all(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.files.len());
        for file in &self.files {
            let bytes = file.encoded_bytes()?;
            let path = root.join(&file.name);
            atomic_write(&path, &bytes)
                .with_context(|| format!("Failed to write build file '{}'", file.name))?;
            tracing::info!("Wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}
