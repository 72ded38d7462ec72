//! Structured template errors
//!
//! Tera errors are parsed into [`TemplateError`] so the CLI can show which build
//! file failed, where, and which variables were available.

use std::path::PathBuf;

/// Template rendering failure with location details
#[derive(Debug)]
pub enum TemplateError {
    VariableNotFound {
        variable: String,
        available_variables: Box<Vec<String>>,
        suggestions: Box<Vec<String>>,
        location: Box<ErrorLocation>,
    },

    SyntaxError {
        message: String,
        location: Box<ErrorLocation>,
    },
}

/// Location information for template errors
#[derive(Debug, Clone, Default)]
pub struct ErrorLocation {
    /// Build file being rendered
    pub file_name: String,
    /// Template file the content was read from, if known
    pub source_path: Option<PathBuf>,
    /// Line number if Tera reported one
    pub line_number: Option<usize>,
    /// Lines around the error, 1-indexed
    pub context_lines: Option<Vec<(usize, String)>>,
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::VariableNotFound {
                variable,
                location,
                ..
            } => {
                write!(f, "Template variable not found: '{}' in '{}'", variable, location.file_name)
            }
            TemplateError::SyntaxError {
                message,
                location,
            } => {
                write!(f, "Template syntax error in '{}': {}", location.file_name, message)
            }
        }
    }
}

impl std::error::Error for TemplateError {}

impl TemplateError {
    #[must_use]
    pub fn location(&self) -> &ErrorLocation {
        match self {
            TemplateError::VariableNotFound {
                location,
                ..
            }
            | TemplateError::SyntaxError {
                location,
                ..
            } => location,
        }
    }

    /// Generate a multi-line report with context and suggestions
    pub fn format_with_context(&self) -> String {
        match self {
            TemplateError::VariableNotFound {
                variable,
                available_variables,
                suggestions,
                location,
            } => format_variable_not_found_error(
                variable,
                available_variables,
                suggestions,
                location,
            ),
            TemplateError::SyntaxError {
                message,
                location,
            } => format_syntax_error(message, location),
        }
    }
}

fn format_location(msg: &mut String, location: &ErrorLocation) {
    msg.push_str(&format!("File: {}\n", location.file_name));
    if let Some(path) = &location.source_path {
        msg.push_str(&format!("Template: {}\n", path.display()));
    }
    if let Some(line) = location.line_number {
        msg.push_str(&format!("Line: {}\n", line));
    }
}

fn format_context_lines(msg: &mut String, location: &ErrorLocation) {
    let Some(lines) = &location.context_lines else {
        return;
    };
    msg.push('\n');
    for (number, line) in lines {
        let marker = if Some(*number) == location.line_number {
            ">"
        } else {
            " "
        };
        msg.push_str(&format!("{} {:>4} | {}\n", marker, number, line));
    }
}

fn format_variable_not_found_error(
    variable: &str,
    available_variables: &[String],
    suggestions: &[String],
    location: &ErrorLocation,
) -> String {
    let mut msg = String::new();

    msg.push_str("Template Variable Not Found\n\n");
    msg.push_str(&format!("Variable: {}\n", variable));
    format_location(&mut msg, location);
    msg.push('\n');

    if !suggestions.is_empty() {
        msg.push_str("Did you mean one of these?\n");
        for suggestion in suggestions {
            msg.push_str(&format!("  - {}\n", suggestion));
        }
        msg.push('\n');
    }

    if !available_variables.is_empty() {
        msg.push_str("Available variables:\n");
        for var in available_variables {
            msg.push_str(&format!("  {}\n", var));
        }
    }

    msg
}

fn format_syntax_error(message: &str, location: &ErrorLocation) -> String {
    let mut msg = String::new();

    msg.push_str("Template Syntax Error\n\n");
    msg.push_str(&format!("Error: {}\n", message));
    format_location(&mut msg, location);
    format_context_lines(&mut msg, location);

    msg.push_str("\nCommon issues:\n");
    msg.push_str("  - Unclosed {{ }} or {% %} delimiters\n");
    msg.push_str("  - Invalid filter names\n");
    msg.push_str("  - Missing quotes around string values\n");

    msg
}
