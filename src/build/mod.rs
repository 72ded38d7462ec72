//! Build model: files, registry, session, plugin roles, and the driver that
//! runs them.
//!
//! The driver knows the phase order and nothing else: plugins are added
//! explicitly, in the order the project configuration lists them.

pub mod builder;
pub mod file;
pub mod plugin;
pub mod registry;
pub mod session;

pub use builder::{BuildReport, Builder};
pub use file::{BuildFile, FileContent};
pub use plugin::Plugin;
pub use registry::FileRegistry;
pub use session::{BuildSession, HostCapabilities};
