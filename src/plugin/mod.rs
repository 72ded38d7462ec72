//! Build plugins.
//!
//! [`GenerateFromShare`] is configured by `[[generate]]` tables in
//! `sharegen.toml`; [`from_project`] turns a loaded project into plugin
//! instances ready for the [`Builder`](crate::build::Builder).

pub mod generate;
pub mod spec;


pub use generate::GenerateFromShare;
pub use spec::{GenerationSpec, Location, Phase};

use anyhow::{Context, Result};
use std::path::Path;
use std::rc::Rc;

use crate::build::Plugin;
use crate::config::ProjectConfig;
use crate::share::ShareLocator;

/// Instantiate every `[[generate]]` entry of a project rooted at `root`.
///
/// All entries are validated before any of them runs, so a bad entry fails
/// the command before the build starts.
pub fn from_project(config: &ProjectConfig, root: &Path) -> Result<Vec<Box<dyn Plugin>>> {
    let locator: Rc<dyn ShareLocator> = Rc::new(config.locator(root));
    let capabilities = config.capabilities();

    config
        .plugin_tables()
        .map(|(name, raw)| {
            let locator = Rc::clone(&locator);
            let plugin = GenerateFromShare::from_config(&name, raw, &config.dist.name, locator)
                .with_context(|| format!("Invalid configuration for '{name}'"))?
                .with_capabilities(capabilities);
            Ok(Box::new(plugin) as Box<dyn Plugin>)
        })
        .collect()
}
