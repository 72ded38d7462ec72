//! `sharegen describe`: resolved plugin configuration, for audit capture.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use super::common::Project;
use crate::plugin;

#[derive(Clone, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One block per plugin, `key = value` lines
    #[default]
    Text,
    Json,
    Toml,
}

/// Configuration of one plugin instance
#[derive(Debug, Clone, Serialize)]
pub struct PluginDescription {
    pub name: String,
    pub config: BTreeMap<String, String>,
}

/// Every plugin, in declaration order
#[derive(Debug, Clone, Serialize)]
struct Description<'a> {
    plugin: &'a [PluginDescription],
}

#[derive(Args, Debug, Default)]
pub struct DescribeCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl DescribeCommand {
    pub fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let project = Project::load(config_path)?;
        let plugins = plugin::from_project(&project.config, &project.root)?;

        let described: Vec<PluginDescription> = plugins
            .iter()
            .map(|plugin| PluginDescription {
                name: plugin.name().to_string(),
                config: plugin.describe_configuration(),
            })
            .collect();

        println!("{}", self.render(&described)?);
        Ok(())
    }

    pub fn render(&self, described: &[PluginDescription]) -> Result<String> {
        let description = Description {
            plugin: described,
        };
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&description)
                .context("Failed to serialize configuration as JSON"),
            OutputFormat::Toml => toml::to_string(&description)
                .context("Failed to serialize configuration as TOML"),
            OutputFormat::Text => {
                let mut out = String::new();
                for entry in described {
                    out.push_str(&format!("{}\n", entry.name.bold()));
                    for (key, value) in &entry.config {
                        out.push_str(&format!("  {key} = {value}\n"));
                    }
                }
                Ok(out.trim_end().to_string())
            }
        }
    }
}
