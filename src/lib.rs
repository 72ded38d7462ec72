//! sharegen - generate build files from shared templates
//!
//! A build plugin that copies a template out of the share directory of a named
//! distribution, renders it with Tera, and adds the result to the distribution
//! being built.
//!
//! # Architecture Overview
//!
//! The build runs as a strictly sequential, two-phase pipeline:
//!
//! - **gather**: locate the template, read its bytes, decode them strictly, and
//!   register a [`build::BuildFile`] under the destination name
//! - **munge**: for that one file, render the text with the configured
//!   variables and encode it strictly with the same encoding
//!
//! After munging, the [`build::Builder`] writes every file below the build
//! root and runs the after-build and after-release hooks.
//!
//! # Core Modules
//!
//! - [`build`] - build session, file registry, plugin trait and the driver
//! - [`plugin`] - the share-template generation plugin
//! - [`config`] - `sharegen.toml` parsing and `[[generate]]` intake
//! - [`share`] - share directory lookup
//! - [`templating`] - Tera rendering with structured errors
//! - [`core`] - error types and text encodings
//! - [`cli`] - command-line interface
//! - [`utils`] - atomic writes and path validation
//!
//! # Example
//!
//! ```toml
//! [dist]
//! name = "My-Dist"
//! version = "1.0.0"
//!
//! [[generate]]
//! dist = "Foo-Bar"
//! source_filename = "tmpl.txt"
//! destination_filename = "out/gen.txt"
//! key1 = "hello"
//! ```
//!
//! With `tmpl.txt` containing `Value: {{ $key1 }}`, `sharegen build` writes
//! `.build/out/gen.txt` containing `Value: hello`.

pub mod build;
pub mod cli;
pub mod config;
pub mod core;
pub mod plugin;
pub mod share;
pub mod templating;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
