//! Configuration intake for `[[generate]]` tables.
//!
//! A raw table is a flat key/value map. Intake runs before any validation:
//!
//! 1. deprecated keys are mapped onto their canonical names
//!    (`filename` → `destination_filename`);
//! 2. recognised option keys are pulled out as strings;
//! 3. every remaining key becomes a template variable.
//!
//! The result, [`PluginOptions`], is still unvalidated: required fields and
//! defaults are applied when the immutable
//! [`GenerationSpec`](crate::plugin::GenerationSpec) is built from it.

use std::collections::BTreeMap;

use crate::core::SharegenError;

/// Raw `[[generate]]` table as parsed from TOML
pub type RawPluginConfig = BTreeMap<String, toml::Value>;

pub const DIST: &str = "dist";
pub const DESTINATION_FILENAME: &str = "destination_filename";
pub const SOURCE_FILENAME: &str = "source_filename";
pub const ENCODING: &str = "encoding";
pub const LOCATION: &str = "location";
pub const PHASE: &str = "phase";

/// Deprecated option names and the canonical option each one maps to
pub const LEGACY_ALIASES: &[(&str, &str)] = &[("filename", DESTINATION_FILENAME)];

/// Options extracted from a raw table, before defaults and validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginOptions {
    pub dist: Option<String>,
    pub destination_filename: Option<String>,
    pub source_filename: Option<String>,
    pub encoding: Option<String>,
    pub location: Option<String>,
    pub phase: Option<String>,
    /// Every unrecognised key, stringified
    pub extra_variables: BTreeMap<String, String>,
}

/// Map deprecated keys onto canonical ones, in place.
///
/// An alias given alongside its canonical key is accepted only when both carry
/// the same value.
pub fn normalize_aliases(plugin: &str, raw: &mut RawPluginConfig) -> Result<(), SharegenError> {
    for (alias, canonical) in LEGACY_ALIASES {
        let Some(value) = raw.remove(*alias) else {
            continue;
        };
        tracing::warn!(
            "{}: option '{}' is deprecated, use '{}' instead",
            plugin,
            alias,
            canonical
        );
        match raw.get(*canonical) {
            Some(existing) if *existing != value => {
                return Err(SharegenError::ConflictingFields {
                    plugin: plugin.to_string(),
                    alias: (*alias).to_string(),
                    field: (*canonical).to_string(),
                });
            }
            Some(_) => {}
            None => {
                raw.insert((*canonical).to_string(), value);
            }
        }
    }
    Ok(())
}

/// Normalise and split a raw table into [`PluginOptions`].
pub fn intake(plugin: &str, mut raw: RawPluginConfig) -> Result<PluginOptions, SharegenError> {
    normalize_aliases(plugin, &mut raw)?;

    let mut take = |key: &str| -> Result<Option<String>, SharegenError> {
        match raw.remove(key) {
            None => Ok(None),
            Some(toml::Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(SharegenError::ConfigError {
                message: format!(
                    "{plugin}: option '{key}' must be a string, found {}",
                    other.type_str()
                ),
            }),
        }
    };

    let mut options = PluginOptions {
        dist: take(DIST)?,
        destination_filename: take(DESTINATION_FILENAME)?,
        source_filename: take(SOURCE_FILENAME)?,
        encoding: take(ENCODING)?,
        location: take(LOCATION)?,
        phase: take(PHASE)?,
        extra_variables: BTreeMap::new(),
    };

    for (key, value) in raw {
        let value = stringify(plugin, &key, value)?;
        options.extra_variables.insert(key, value);
    }

    Ok(options)
}

/// Template variables are strings; scalar TOML values are converted, nested
/// values are rejected.
fn stringify(plugin: &str, key: &str, value: toml::Value) -> Result<String, SharegenError> {
    match value {
        toml::Value::String(s) => Ok(s),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(f.to_string()),
        toml::Value::Boolean(b) => Ok(b.to_string()),
        toml::Value::Datetime(d) => Ok(d.to_string()),
        other => Err(SharegenError::ConfigError {
            message: format!(
                "{plugin}: template variable '{key}' must be a string, found {}",
                other.type_str()
            ),
        }),
    }
}
