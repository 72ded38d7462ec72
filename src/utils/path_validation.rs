//! Validation for configured relative paths.
//!
//! Destination and source filenames come from user configuration and are joined
//! onto the build root, the project root, or a share directory. They must stay
//! inside that base.

use std::path::{Component, Path};

use crate::core::SharegenError;

/// Checks that `path` is a non-empty relative path without `..` components.
pub fn validate_relative_path(path: &str) -> Result<(), SharegenError> {
    let invalid = |reason: &str| SharegenError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    if path.trim().is_empty() {
        return Err(invalid("path is empty"));
    }

    let candidate = Path::new(path);
    if candidate.is_absolute() || path.starts_with('/') || path.starts_with('\\') {
        return Err(invalid("path must be relative"));
    }

    for component in candidate.components() {
        match component {
            Component::ParentDir => {
                return Err(invalid("path contains parent directory reference (..)"));
            }
            Component::Prefix(_) | Component::RootDir => {
                return Err(invalid("path must be relative"));
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }

    Ok(())
}

/// Checks that `name` is usable as a single directory name below a search root.
///
/// Empty names, `.`/`..`, absolute paths and names with separators are rejected.
pub fn validate_distribution_name(name: &str) -> Result<(), SharegenError> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == name => Ok(()),
        _ => Err(SharegenError::InvalidPath {
            path: name.to_string(),
            reason: "distribution name must be a single directory name".to_string(),
        }),
    }
}
