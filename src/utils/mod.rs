//! Utilities
//!
//! - [`fs`] - atomic writes and directory creation
//! - [`path_validation`] - checks for user-supplied relative paths

pub mod fs;
pub mod path_validation;

pub use fs::{atomic_write, ensure_dir};
pub use path_validation::{validate_distribution_name, validate_relative_path};
