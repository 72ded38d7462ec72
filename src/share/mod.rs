//! Share directory lookup.
//!
//! A *share directory* is a read-only directory of auxiliary files distributed
//! alongside a distribution, found by distribution name. [`ShareLocator`] is the
//! lookup contract the generation plugin depends on; [`ShareDirLocator`] is the
//! file system implementation.
//!
//! # Resolution order
//!
//! 1. Explicit per-distribution directories ([`ShareDirLocator::with_dist_dir`]).
//! 2. Search roots, in order. A root holds one directory per distribution:
//!    `<root>/<dist-name>/...`.
//!
//! The first directory found for a distribution is authoritative: if the file is
//! not inside it, lookup fails rather than falling through to later roots.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use strsim::levenshtein;
use walkdir::WalkDir;

use crate::core::SharegenError;
use crate::utils::{validate_distribution_name, validate_relative_path};

/// Environment variable holding extra search roots, in platform path-list syntax.
pub const SHARE_PATH_ENV: &str = "SHAREGEN_SHARE_PATH";

/// Maximum number of "did you mean" suggestions attached to a lookup failure
const MAX_SUGGESTIONS: usize = 3;

/// Resolve a file inside a distribution's share directory.
pub trait ShareLocator {
    /// Absolute path of `relative` inside the share directory of `dist`.
    fn locate(&self, dist: &str, relative: &str) -> Result<PathBuf, SharegenError>;
}

/// File system backed [`ShareLocator`].
#[derive(Debug, Clone, Default)]
pub struct ShareDirLocator {
    dist_dirs: BTreeMap<String, PathBuf>,
    search_roots: Vec<PathBuf>,
}

impl ShareDirLocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a distribution name straight to its share directory.
    #[must_use]
    pub fn with_dist_dir(mut self, dist: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        self.dist_dirs.insert(dist.into(), dir.into());
        self
    }

    /// Append a search root.
    #[must_use]
    pub fn with_search_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.search_roots.push(root.into());
        self
    }

    /// Append the roots listed in [`SHARE_PATH_ENV`] and the per-user data
    /// directory (`<data dir>/sharegen/dist`).
    #[must_use]
    pub fn with_default_roots(mut self) -> Self {
        if let Some(paths) = std::env::var_os(SHARE_PATH_ENV) {
            self.search_roots.extend(std::env::split_paths(&paths).filter(|p| !p.as_os_str().is_empty()));
        }
        if let Some(data_dir) = dirs::data_dir() {
            self.search_roots.push(data_dir.join("sharegen").join("dist"));
        }
        self
    }

    #[must_use]
    pub fn search_roots(&self) -> &[PathBuf] {
        &self.search_roots
    }

    /// Share directory of `dist`, if one exists.
    #[must_use]
    pub fn share_dir(&self, dist: &str) -> Option<PathBuf> {
        if let Some(dir) = self.dist_dirs.get(dist) {
            return dir.is_dir().then(|| dir.clone());
        }
        self.search_roots.iter().map(|root| root.join(dist)).find(|dir| dir.is_dir())
    }

    /// Every directory that was or would be consulted for `dist`.
    fn searched(&self, dist: &str) -> Vec<String> {
        let mut searched = Vec::new();
        if let Some(dir) = self.dist_dirs.get(dist) {
            searched.push(dir.display().to_string());
        }
        searched.extend(self.search_roots.iter().map(|root| root.join(dist).display().to_string()));
        searched
    }

    /// Up to [`MAX_SUGGESTIONS`] files under `share_dir` whose relative path is
    /// close to `wanted`.
    fn suggestions(share_dir: &Path, wanted: &str) -> Vec<String> {
        let threshold = (wanted.len() / 2).max(2);
        let mut scored: Vec<(usize, String)> = WalkDir::new(share_dir)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative = entry.path().strip_prefix(share_dir).ok()?;
                let relative = relative.to_string_lossy().replace('\\', "/");
                let distance = levenshtein(wanted, &relative);
                (distance <= threshold).then_some((distance, relative))
            })
            .collect();
        scored.sort();
        scored.into_iter().take(MAX_SUGGESTIONS).map(|(_, path)| path).collect()
    }
}

impl ShareLocator for ShareDirLocator {
    fn locate(&self, dist: &str, relative: &str) -> Result<PathBuf, SharegenError> {
        validate_distribution_name(dist)?;
        validate_relative_path(relative)?;

        let share_dir = self.share_dir(dist).ok_or_else(|| SharegenError::DistributionNotFound {
            dist: dist.to_string(),
            searched: self.searched(dist),
        })?;

        let path = share_dir.join(relative);
        if !path.is_file() {
            return Err(SharegenError::ResourceNotFound {
                dist: dist.to_string(),
                path: relative.to_string(),
                share_dir: share_dir.display().to_string(),
                suggestions: Self::suggestions(&share_dir, relative),
            });
        }

        tracing::debug!("Located '{}' for '{}' at {}", relative, dist, path.display());
        Ok(path)
    }
}
