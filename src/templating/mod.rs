//! Tera templating for generated files.
//!
//! Templates are plain text files read from a share directory. They are rendered
//! once, against a flat context built by the generation plugin:
//!
//! - every extra key from the plugin's `[[generate]]` table, as a string
//! - `dist`: the build session (`{{ dist.name }}`, `{{ dist.version }}`, ...)
//! - `plugin`: the plugin's resolved configuration (`{{ plugin.destination_filename }}`)
//!
//! `dist` and `plugin` are inserted last and cannot be overridden by user keys.
//!
//! # Syntax
//!
//! Standard Tera syntax: `{{ var }}`, `{% if %}`, `{% for %}`, filters. References
//! may also carry a leading sigil, `{{ $var }}`, which is rewritten to
//! `{{ var }}` before rendering.
//!
//! ```rust
//! use sharegen_cli::templating::TemplateRenderer;
//! use tera::Context;
//!
//! let mut context = Context::new();
//! context.insert("key1", "hello");
//! let out = TemplateRenderer::new().render("Value: {{ $key1 }}", &context, None).unwrap();
//! assert_eq!(out, "Value: hello");
//! ```

pub mod error;
pub mod renderer;


pub use error::{ErrorLocation, TemplateError};
pub use renderer::{RenderingMetadata, TemplateRenderer};
