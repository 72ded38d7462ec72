//! Plugin roles invoked by the [`Builder`](super::Builder).
//!
//! A plugin implements [`Plugin`] and overrides the hooks for the phases it takes
//! part in. The defaults do nothing, so a plugin that only gathers files leaves
//! `munge_file` alone.
//!
//! Phase order is fixed: every `gather_files`, then `munge_file` for every
//! (file, plugin) pair, then the build is written, then every `after_build`, and
//! for releases every `after_release`.

use anyhow::Result;
use std::collections::BTreeMap;

use super::file::BuildFile;
use super::registry::FileRegistry;
use super::session::BuildSession;

pub trait Plugin {
    /// Instance name used in logs and diagnostics.
    fn name(&self) -> &str;

    /// Gather phase: add files to the registry.
    fn gather_files(&mut self, _registry: &mut FileRegistry, _session: &BuildSession) -> Result<()> {
        Ok(())
    }

    /// Munge phase: called once per registered file.
    ///
    /// Implementations must ignore files they do not own. Callers must not munge
    /// the same file twice through the same plugin.
    fn munge_file(&self, _file: &mut BuildFile, _session: &BuildSession) -> Result<()> {
        Ok(())
    }

    /// Runs after the build directory has been written.
    fn after_build(&self, _session: &BuildSession) -> Result<()> {
        Ok(())
    }

    /// Runs after a release.
    fn after_release(&self, _session: &BuildSession) -> Result<()> {
        Ok(())
    }

    /// Resolved configuration, for audit output.
    fn describe_configuration(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }
}
