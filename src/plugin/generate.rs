//! Generate a build file from a template in a distribution's share directory.
//!
//! # Pipeline
//!
//! **Gather** ([`Plugin::gather_files`]): locate `source_filename` in the share
//! directory of `dist`, read it, decode it strictly, and register it under
//! `destination_filename`. Any failure aborts the build with nothing
//! registered.
//!
//! **Munge** ([`Plugin::munge_file`]): for the one file named
//! `destination_filename`, render the content with Tera and encode the result
//! strictly. Every other file is left untouched.
//!
//! Template variables are the extra configuration keys, then `dist` (the build
//! session) and `plugin` (this plugin's configuration). The two reserved
//! bindings are inserted last, so a configuration key named `dist` or `plugin`
//! never reaches the template.
//!
//! With `location = "root"` nothing is gathered. The file is rendered and
//! written to the project root by the after-build or after-release hook,
//! depending on `phase`.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tera::Context as TeraContext;

use super::spec::{GenerationSpec, Location, Phase};
use crate::build::{BuildFile, BuildSession, FileContent, FileRegistry, HostCapabilities, Plugin};
use crate::config::{RawPluginConfig, intake};
use crate::core::SharegenError;
use crate::share::ShareLocator;
use crate::templating::{RenderingMetadata, TemplateRenderer};
use crate::utils::atomic_write;

/// Configuration key reporting the plugin version in
/// [`describe_configuration`](Plugin::describe_configuration)
pub const VERSION_KEY: &str = "version";

/// Build plugin that renders a shared template into the distribution.
#[derive(Serialize)]
pub struct GenerateFromShare {
    name: String,
    #[serde(flatten)]
    spec: GenerationSpec,
    #[serde(skip)]
    locator: Rc<dyn ShareLocator>,
    #[serde(skip)]
    capabilities: HostCapabilities,
    #[serde(skip)]
    renderer: TemplateRenderer,
    /// Template path resolved during gather, for error reports
    #[serde(skip)]
    source_path: Option<PathBuf>,
}

impl GenerateFromShare {
    pub fn new(name: impl Into<String>, spec: GenerationSpec, locator: Rc<dyn ShareLocator>) -> Self {
        Self {
            name: name.into(),
            spec,
            locator,
            capabilities: HostCapabilities::default(),
            renderer: TemplateRenderer::new(),
            source_path: None,
        }
    }

    /// Build a plugin from a raw `[[generate]]` table.
    ///
    /// Runs the intake pass, then validation. Fails before any build work when
    /// the configuration is incomplete or invalid.
    pub fn from_config(
        name: &str,
        raw: RawPluginConfig,
        declaring_dist: &str,
        locator: Rc<dyn ShareLocator>,
    ) -> Result<Self> {
        let options = intake(name, raw)?;
        let spec = GenerationSpec::from_options(name, options, declaring_dist)?;
        tracing::debug!(
            "{}: {} from '{}' ({}, {})",
            name,
            spec.destination_filename,
            spec.source_distribution,
            spec.encoding,
            spec.location
        );
        Ok(Self::new(name, spec, locator))
    }

    #[must_use]
    pub fn with_capabilities(mut self, capabilities: HostCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    #[must_use]
    pub fn spec(&self) -> &GenerationSpec {
        &self.spec
    }

    /// Locate, read and decode the template.
    ///
    /// Returns the resolved path along with the decoded text.
    pub fn materialize(&self) -> Result<(PathBuf, String)> {
        let spec = &self.spec;
        let path = self.locator.locate(&spec.source_distribution, &spec.source_filename)?;

        let bytes = std::fs::read(&path)
            .with_context(|| format!("Failed to read template: {}", path.display()))?;

        let text = spec.encoding.decode(&bytes).map_err(|failure| SharegenError::DecodeError {
            path: path.display().to_string(),
            encoding: spec.encoding.to_string(),
            reason: failure.to_string(),
        })?;

        tracing::debug!(
            "{}: read {} bytes from {}",
            self.name,
            bytes.len(),
            path.display()
        );
        Ok((path, text))
    }

    /// Variables for rendering: extra keys first, reserved bindings last.
    pub fn template_context(&self, session: &BuildSession) -> Result<TeraContext> {
        let mut context = TeraContext::new();
        for (key, value) in &self.spec.extra_variables {
            context.insert(key.as_str(), value);
        }
        context
            .try_insert("dist", session)
            .context("Failed to expose the build session to templates")?;
        context
            .try_insert("plugin", self)
            .context("Failed to expose the plugin configuration to templates")?;
        Ok(context)
    }

    /// Render `text` and encode it, unless the host manages encoding.
    pub fn render_content(
        &self,
        text: &str,
        session: &BuildSession,
        source_path: Option<&Path>,
    ) -> Result<FileContent> {
        let context = self.template_context(session)?;
        let metadata = RenderingMetadata {
            file_name: self.spec.destination_filename.clone(),
            source_path: source_path.map(Path::to_path_buf),
        };
        let rendered = self.renderer.render(text, &context, Some(&metadata))?;

        if self.capabilities.manages_encoding {
            return Ok(FileContent::Text(rendered));
        }

        let encoding = self.spec.encoding;
        let bytes = encoding.encode(&rendered).map_err(|failure| SharegenError::EncodeError {
            file: self.spec.destination_filename.clone(),
            encoding: encoding.to_string(),
            reason: failure.to_string(),
        })?;
        Ok(FileContent::Bytes(bytes))
    }

    /// Render the template and write it below the project root.
    fn write_to_root(&self, session: &BuildSession) -> Result<()> {
        let (source_path, text) = self.materialize()?;
        let file = BuildFile {
            name: self.spec.destination_filename.clone(),
            content: self.render_content(&text, session, Some(&source_path))?,
            encoding: self.spec.encoding,
            added_by: self.name.clone(),
        };

        let target = session.root.join(&self.spec.destination_filename);
        atomic_write(&target, &file.encoded_bytes()?)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        tracing::info!("Wrote {}", target.display());
        Ok(())
    }

    fn owns(&self, file: &BuildFile) -> bool {
        self.spec.location == Location::Build && file.name == self.spec.destination_filename
    }
}

fn file_text(file: &BuildFile) -> Result<&str> {
    file.as_text().ok_or_else(|| {
        anyhow::Error::from(SharegenError::Other {
            message: format!("Build file '{}' has already been encoded", file.name),
        })
    })
}

impl Plugin for GenerateFromShare {
    fn name(&self) -> &str {
        &self.name
    }

    fn gather_files(&mut self, registry: &mut FileRegistry, _session: &BuildSession) -> Result<()> {
        if self.spec.location == Location::Root {
            tracing::debug!("{}: writes to the project root, nothing to gather", self.name);
            return Ok(());
        }

        let (source_path, text) = self.materialize()?;
        registry.add(BuildFile::text(
            &self.spec.destination_filename,
            text,
            self.spec.encoding,
            &self.name,
        ))?;
        self.source_path = Some(source_path);
        Ok(())
    }

    fn munge_file(&self, file: &mut BuildFile, session: &BuildSession) -> Result<()> {
        if !self.owns(file) {
            return Ok(());
        }

        tracing::debug!("{}: rendering {}", self.name, file.name);
        let content = self.render_content(file_text(file)?, session, self.source_path.as_deref())?;
        file.content = content;
        Ok(())
    }

    fn after_build(&self, session: &BuildSession) -> Result<()> {
        if self.spec.location == Location::Root && self.spec.phase == Phase::Build {
            self.write_to_root(session)?;
        }
        Ok(())
    }

    fn after_release(&self, session: &BuildSession) -> Result<()> {
        if self.spec.location == Location::Root && self.spec.phase == Phase::Release {
            self.write_to_root(session)?;
        }
        Ok(())
    }

    fn describe_configuration(&self) -> BTreeMap<String, String> {
        let spec = &self.spec;
        let mut config = spec.extra_variables.clone();
        config.insert("dist".to_string(), spec.source_distribution.clone());
        config.insert("destination_filename".to_string(), spec.destination_filename.clone());
        config.insert("source_filename".to_string(), spec.source_filename.clone());
        config.insert("encoding".to_string(), spec.encoding.to_string());
        config.insert("location".to_string(), spec.location.to_string());
        config.insert("phase".to_string(), spec.phase.to_string());
        config.insert(VERSION_KEY.to_string(), env!("CARGO_PKG_VERSION").to_string());
        config
    }
}
