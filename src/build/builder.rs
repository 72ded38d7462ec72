//! Sequential build driver.

use anyhow::{Context, Result};
use std::path::PathBuf;

use super::plugin::Plugin;
use super::registry::FileRegistry;
use super::session::BuildSession;

/// Outcome of a build run.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Files written below the build root, in registry order
    pub written: Vec<PathBuf>,
}

/// Runs plugins through the build lifecycle.
///
/// Each phase completes for every plugin before the next phase starts, on the
/// calling thread. The first error aborts the run; nothing is retried.
pub struct Builder {
    session: BuildSession,
    plugins: Vec<Box<dyn Plugin>>,
    registry: FileRegistry,
}

impl Builder {
    pub fn new(session: BuildSession) -> Self {
        Self {
            session,
            plugins: Vec::new(),
            registry: FileRegistry::new(),
        }
    }

    pub fn add_plugin(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    #[must_use]
    pub fn registry(&self) -> &FileRegistry {
        &self.registry
    }

    /// Gather and munge without writing anything.
    pub fn prepare(&mut self) -> Result<()> {
        tracing::debug!("Gather phase ({} plugins)", self.plugins.len());
        for plugin in &mut self.plugins {
            plugin
                .gather_files(&mut self.registry, &self.session)
                .with_context(|| format!("Gather phase failed in '{}'", plugin.name()))?;
        }

        tracing::debug!("Munge phase ({} files)", self.registry.len());
        for file in self.registry.iter_mut() {
            for plugin in &self.plugins {
                plugin.munge_file(file, &self.session).with_context(|| {
                    format!("Munge phase failed in '{}' for '{}'", plugin.name(), file.name)
                })?;
            }
        }
        Ok(())
    }

    /// Run gather, munge, write, and after-build hooks.
    pub fn build(&mut self) -> Result<BuildReport> {
        self.prepare()?;

        let written = self.registry.write_all(&self.session.build_root).with_context(|| {
            format!("Failed to write build to {}", self.session.build_root.display())
        })?;

        for plugin in &self.plugins {
            plugin
                .after_build(&self.session)
                .with_context(|| format!("After-build hook failed in '{}'", plugin.name()))?;
        }

        Ok(BuildReport {
            written,
        })
    }

    /// Run a full build followed by the after-release hooks.
    pub fn release(&mut self) -> Result<BuildReport> {
        let report = self.build()?;
        for plugin in &self.plugins {
            plugin
                .after_release(&self.session)
                .with_context(|| format!("After-release hook failed in '{}'", plugin.name()))?;
        }
        Ok(report)
    }
}
