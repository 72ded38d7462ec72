//! Configuration loading.
//!
//! - [`parser`]: generic TOML parsing with file context
//! - [`project`]: the `sharegen.toml` project file
//! - [`intake`]: normalisation of raw `[[generate]]` tables into plugin options

pub mod intake;
pub mod parser;
pub mod project;

pub use intake::{PluginOptions, RawPluginConfig, intake};
pub use parser::parse_config;
pub use project::{CONFIG_FILE_NAME, DistSection, ProjectConfig, ShareSection};
