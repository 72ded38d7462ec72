//! `sharegen build` and `sharegen release`.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

use super::common::Project;
use crate::build::Builder;
use crate::plugin;

/// Which lifecycle to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Build,
    Release,
}

#[derive(Args, Debug, Default)]
pub struct BuildCommand {
    /// Output directory, overriding [dist].build_dir
    #[arg(long, value_name = "DIR")]
    pub build_dir: Option<PathBuf>,
}

impl BuildCommand {
    pub fn execute(self, config_path: Option<&Path>, mode: BuildMode) -> Result<()> {
        let project = Project::load(config_path)?;
        let session = project.config.session(&project.root, self.build_dir.as_deref());
        let plugins = plugin::from_project(&project.config, &project.root)?;

        tracing::debug!(
            "Building {} {} into {}",
            session.name,
            session.version,
            session.build_root.display()
        );

        let mut builder = Builder::new(session);
        for plugin in plugins {
            builder.add_plugin(plugin);
        }

        let report = match mode {
            BuildMode::Build => builder.build()?,
            BuildMode::Release => builder.release()?,
        };

        for path in &report.written {
            let shown = path.strip_prefix(&project.root).unwrap_or(path);
            println!("  {}", shown.display());
        }
        println!(
            "{} {} {} file(s)",
            "✓".green(),
            match mode {
                BuildMode::Build => "Built",
                BuildMode::Release => "Released",
            },
            report.written.len()
        );
        Ok(())
    }
}
