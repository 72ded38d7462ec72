//! The distribution being built.

use serde::Serialize;
use std::path::PathBuf;

/// Capabilities the host build driver guarantees to plugins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HostCapabilities {
    /// The host encodes text files itself when writing them, so plugins may
    /// leave rendered content as text.
    pub manages_encoding: bool,
}

/// Build-session context.
///
/// Exposed to templates as the `dist` variable (`{{ dist.name }}`,
/// `{{ dist.version }}`); plugins pass it through without inspecting it.
#[derive(Debug, Clone, Serialize)]
pub struct BuildSession {
    /// Distribution name, also the default source distribution for plugins
    pub name: String,
    /// Distribution version
    pub version: String,
    /// Project root directory
    pub root: PathBuf,
    /// Directory the build is written to
    pub build_root: PathBuf,
    /// Host capabilities in effect for this build
    pub capabilities: HostCapabilities,
}

impl BuildSession {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        root: impl Into<PathBuf>,
        build_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            root: root.into(),
            build_root: build_root.into(),
            capabilities: HostCapabilities::default(),
        }
    }

    #[must_use]
    pub fn with_capabilities(mut self, capabilities: HostCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }
}
