//! Resolved, immutable configuration of a generation plugin instance.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::config::PluginOptions;
use crate::config::intake::{DESTINATION_FILENAME, LOCATION, PHASE};
use crate::core::{Encoding, SharegenError};
use crate::utils::{validate_distribution_name, validate_relative_path};

/// Template variable names bound by the plugin itself
pub const RESERVED_VARIABLES: &[&str] = &["dist", "plugin"];

/// Where a generated file ends up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// Registered as a build file and written below the build root
    #[default]
    Build,
    /// Written straight into the project root by a lifecycle hook
    Root,
}

/// Lifecycle hook that writes a [`Location::Root`] file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Build,
    #[default]
    Release,
}

impl Location {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Location::Build => "build",
            Location::Root => "root",
        }
    }
}

impl Phase {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Phase::Build => "build",
            Phase::Release => "release",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = SharegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "build" => Ok(Location::Build),
            "root" => Ok(Location::Root),
            _ => Err(invalid_choice(LOCATION, s, &["build", "root"])),
        }
    }
}

impl FromStr for Phase {
    type Err = SharegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "build" => Ok(Phase::Build),
            "release" => Ok(Phase::Release),
            _ => Err(invalid_choice(PHASE, s, &["build", "release"])),
        }
    }
}

fn invalid_choice(option: &str, value: &str, allowed: &[&str]) -> SharegenError {
    SharegenError::ConfigError {
        message: format!("invalid {option} '{value}', expected one of: {}", allowed.join(", ")),
    }
}

/// What to generate, from where, and with which variables.
///
/// Built once from [`PluginOptions`] by [`GenerationSpec::from_options`] and
/// never changed afterwards. Serialized as part of the `plugin` template
/// variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationSpec {
    /// Distribution whose share directory holds the template
    #[serde(rename = "dist")]
    pub source_distribution: String,
    /// Path of the generated file
    pub destination_filename: String,
    /// Path of the template inside the share directory
    pub source_filename: String,
    pub encoding: Encoding,
    pub location: Location,
    pub phase: Phase,
    /// Every unrecognised configuration key, passed to the template verbatim
    pub extra_variables: BTreeMap<String, String>,
}

impl GenerationSpec {
    /// Apply defaults and validate.
    ///
    /// `declaring_dist` is the distribution that declares the plugin; it is the
    /// source distribution unless `dist` is given.
    ///
    /// # Errors
    ///
    /// [`SharegenError::MissingField`] without a destination filename,
    /// [`SharegenError::InvalidPath`] for absolute or escaping paths and for a
    /// source distribution that is not a single directory name, and
    /// [`SharegenError::UnknownEncoding`] / [`SharegenError::ConfigError`] for
    /// unrecognised encoding, location or phase values.
    pub fn from_options(
        plugin: &str,
        options: PluginOptions,
        declaring_dist: &str,
    ) -> Result<Self, SharegenError> {
        let destination_filename =
            options.destination_filename.ok_or_else(|| SharegenError::MissingField {
                plugin: plugin.to_string(),
                field: DESTINATION_FILENAME.to_string(),
            })?;
        let source_filename = options.source_filename.unwrap_or_else(|| destination_filename.clone());

        validate_relative_path(&destination_filename)?;
        validate_relative_path(&source_filename)?;

        let source_distribution = options.dist.unwrap_or_else(|| declaring_dist.to_string());
        validate_distribution_name(&source_distribution)?;

        let encoding =
            options.encoding.as_deref().map(str::parse::<Encoding>).transpose()?.unwrap_or_default();
        let location =
            options.location.as_deref().map(str::parse::<Location>).transpose()?.unwrap_or_default();
        let phase =
            options.phase.as_deref().map(str::parse::<Phase>).transpose()?.unwrap_or_default();

        for reserved in RESERVED_VARIABLES {
            if options.extra_variables.contains_key(*reserved) {
                tracing::warn!(
                    "{}: variable '{}' is reserved and will be ignored in templates",
                    plugin,
                    reserved
                );
            }
        }

        Ok(Self {
            source_distribution,
            destination_filename,
            source_filename,
            encoding,
            location,
            phase,
            extra_variables: options.extra_variables,
        })
    }
}
