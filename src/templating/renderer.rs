//! Template rendering engine with Tera.
//!
//! [`TemplateRenderer`] wraps a one-off Tera render with two extras: sigil-style
//! variable references are accepted, and Tera errors are parsed into
//! [`TemplateError`] values that name the build file being rendered.

use regex::Regex;
use std::path::PathBuf;
use strsim::levenshtein;
use tera::{Context as TeraContext, Tera};

use super::error::{ErrorLocation, TemplateError};

/// Maximum allowed Levenshtein distance as a percentage of target length for suggestions.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Number of lines shown on each side of a syntax error
const CONTEXT_LINES: usize = 3;

/// Where the template being rendered came from, for error reports
#[derive(Debug, Clone, Default)]
pub struct RenderingMetadata {
    /// Build file being rendered
    pub file_name: String,
    /// Template file on disk, if known
    pub source_path: Option<PathBuf>,
}

/// Template renderer backed by Tera.
///
/// Each call builds a fresh `Tera` instance, so there is no shared state between
/// renders and no template can include or extend another.
#[derive(Debug, Clone, Default)]
pub struct TemplateRenderer;

impl TemplateRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Render `template_content` against `context`.
    ///
    /// References written with a leading sigil (`{{ $name }}`) are treated as
    /// `{{ name }}`. Undefined variables and syntax errors are returned as
    /// [`TemplateError`]; nothing is rendered partially.
    pub fn render(
        &self,
        template_content: &str,
        context: &TeraContext,
        metadata: Option<&RenderingMetadata>,
    ) -> Result<String, TemplateError> {
        let normalized = Self::strip_sigils(template_content);

        tracing::debug!("Rendering template with context");
        Self::log_context(context);

        let mut tera = Tera::default();
        let rendered = tera
            .render_str(&normalized, context)
            .map_err(|e| Self::parse_tera_error(&e, &normalized, context, metadata))?;

        tracing::debug!("Template rendering complete ({} bytes)", rendered.len());
        Ok(rendered)
    }

    /// Rewrite `$name` to `name` inside expression and statement blocks.
    ///
    /// Text outside `{{ }}` and `{% %}` is left alone, so a literal `$` in
    /// ordinary content survives rendering. So are `{% raw %}` bodies and
    /// string literals inside blocks.
    pub(crate) fn strip_sigils(content: &str) -> String {
        // A raw span, or a `{{ ... }}` / `{% ... %}` block, possibly spanning lines.
        // Raw comes first so it wins over the plain statement block at the same offset.
        let (Ok(block_re), Ok(sigil_re)) = (
            Regex::new(
                r"(?s)(\{%-?\s*raw\s*-?%\}.*?\{%-?\s*endraw\s*-?%\})|\{\{.*?\}\}|\{%.*?%\}",
            ),
            Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)"),
        ) else {
            return content.to_string();
        };

        block_re
            .replace_all(content, |caps: &regex::Captures<'_>| {
                if caps.get(1).is_some() {
                    caps[0].to_string()
                } else {
                    Self::strip_outside_strings(&caps[0], &sigil_re)
                }
            })
            .into_owned()
    }

    /// Apply the sigil rewrite to a block, skipping `"..."`, `'...'` and
    /// `` `...` `` literals. Tera strings have no escapes, so the closing quote
    /// is the next matching quote character.
    fn strip_outside_strings(block: &str, sigil_re: &Regex) -> String {
        let mut out = String::with_capacity(block.len());
        let mut segment_start = 0;
        let mut quote: Option<char> = None;

        for (idx, ch) in block.char_indices() {
            match quote {
                Some(open) if ch == open => {
                    let end = idx + ch.len_utf8();
                    out.push_str(&block[segment_start..end]);
                    segment_start = end;
                    quote = None;
                }
                Some(_) => {}
                None if matches!(ch, '"' | '\'' | '`') => {
                    out.push_str(&sigil_re.replace_all(&block[segment_start..idx], "${1}"));
                    segment_start = idx;
                    quote = Some(ch);
                }
                None => {}
            }
        }

        let rest = &block[segment_start..];
        if quote.is_some() {
            // Unterminated literal: leave it for Tera to report
            out.push_str(rest);
        } else {
            out.push_str(&sigil_re.replace_all(rest, "${1}"));
        }
        out
    }

    fn parse_tera_error(
        error: &tera::Error,
        template_content: &str,
        context: &TeraContext,
        metadata: Option<&RenderingMetadata>,
    ) -> TemplateError {
        let messages = Self::error_chain(error);

        let line_number = Self::extract_line_number(&messages);
        let context_lines = line_number
            .map(|line| Self::extract_context_lines(template_content, line, CONTEXT_LINES))
            .filter(|lines| !lines.is_empty());

        let meta = metadata.cloned().unwrap_or_default();
        let location = Box::new(ErrorLocation {
            file_name: meta.file_name,
            source_path: meta.source_path,
            line_number,
            context_lines,
        });

        if let Some(name) = Self::extract_variable_name(&messages) {
            let available_variables = Self::extract_available_variables(context);
            let suggestions = Self::find_similar_variables(&name, &available_variables);
            return TemplateError::VariableNotFound {
                variable: name,
                available_variables: Box::new(available_variables),
                suggestions: Box::new(suggestions),
                location,
            };
        }

        TemplateError::SyntaxError {
            message: Self::format_tera_error(&messages),
            location,
        }
    }

    /// Variable name from a "Variable `foo` not found" message anywhere in the chain
    fn extract_variable_name(messages: &[String]) -> Option<String> {
        let re = Regex::new(r"Variable `([^`]+)` not found").ok()?;
        messages.iter().find_map(|msg| re.captures(msg).map(|caps| caps[1].to_string()))
    }

    /// Line number from a Tera parse error location (`--> 3:7`)
    fn extract_line_number(messages: &[String]) -> Option<usize> {
        let re = Regex::new(r"--> (\d+):(\d+)").ok()?;
        messages
            .iter()
            .find_map(|msg| re.captures(msg).and_then(|caps| caps[1].parse::<usize>().ok()))
    }

    /// Every message in the error's source chain
    fn error_chain(error: &tera::Error) -> Vec<String> {
        use std::error::Error;

        let mut messages = vec![error.to_string()];
        let mut current: Option<&dyn Error> = error.source();
        while let Some(err) = current {
            messages.push(err.to_string());
            current = err.source();
        }
        messages
    }

    /// Top-level context keys, with one level of nesting for objects
    fn extract_available_variables(context: &TeraContext) -> Vec<String> {
        let mut vars = Vec::new();
        if let serde_json::Value::Object(map) = context.clone().into_json() {
            for (key, value) in map {
                match value {
                    serde_json::Value::Object(fields) => {
                        vars.extend(fields.keys().map(|field| format!("{key}.{field}")));
                    }
                    _ => vars.push(key),
                }
            }
        }
        vars.sort();
        vars
    }

    fn find_similar_variables(target: &str, available: &[String]) -> Vec<String> {
        let mut scored: Vec<_> =
            available.iter().map(|var| (levenshtein(target, var), var.clone())).collect();
        scored.sort();

        scored
            .into_iter()
            .filter(|(dist, _)| *dist <= target.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
            .take(3)
            .map(|(_, var)| var)
            .collect()
    }

    fn extract_context_lines(
        content: &str,
        error_line: usize,
        context_size: usize,
    ) -> Vec<(usize, String)> {
        let lines: Vec<&str> = content.lines().collect();
        let total_lines = lines.len();

        if error_line == 0 || error_line > total_lines {
            return Vec::new();
        }

        let start = error_line.saturating_sub(context_size + 1);
        let end = (error_line + context_size).min(total_lines);

        lines[start..end]
            .iter()
            .enumerate()
            .map(|(idx, line)| (start + idx + 1, (*line).to_string()))
            .collect()
    }

    /// Join the useful parts of a Tera error chain, hiding the internal
    /// one-off template name.
    fn format_tera_error(messages: &[String]) -> String {
        let cleaned: Vec<String> = messages
            .iter()
            .map(|msg| {
                msg.replace("while rendering '__tera_one_off'", "")
                    .replace("Failed to render '__tera_one_off'", "Template rendering failed")
                    .replace("Failed to parse '__tera_one_off'", "Template syntax error")
                    .replace("'__tera_one_off'", "template")
                    .trim()
                    .to_string()
            })
            .filter(|msg| {
                !msg.is_empty() && msg != "Template rendering failed" && msg != "Template syntax error"
            })
            .collect();

        if cleaned.is_empty() {
            "Template syntax error".to_string()
        } else {
            cleaned.join("\n  -> ")
        }
    }

    fn log_context(context: &TeraContext) {
        if let serde_json::Value::Object(map) = context.clone().into_json() {
            for (key, value) in map {
                match value {
                    serde_json::Value::String(s) => tracing::debug!("  {} = {:?}", key, s),
                    serde_json::Value::Object(_) => tracing::debug!("  {} = {{...}}", key),
                    other => tracing::debug!("  {} = {}", key, other),
                }
            }
        }
    }
}
