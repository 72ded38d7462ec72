//! Error handling for sharegen
//!
//! Two layers, as everywhere in this crate:
//! - [`SharegenError`] - strongly-typed failure cases, carried inside [`anyhow::Error`]
//! - [`ErrorContext`] - user-facing wrapper with details and a suggestion
//!
//! Nothing in the generation pipeline is recovered locally. Every failure aborts the
//! build and is turned into an [`ErrorContext`] by [`user_friendly_error`] at the CLI
//! boundary.
//!
//! # Examples
//!
//! ```rust,no_run
//! use sharegen_cli::core::{SharegenError, user_friendly_error};
//!
//! let error = SharegenError::MissingField {
//!     plugin: "generate[0]".to_string(),
//!     field: "destination_filename".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::templating::TemplateError;

/// The main error type for sharegen operations.
///
/// Variants map onto the failure taxonomy of the generation pipeline:
/// configuration errors fail at plugin construction, lookup and codec errors
/// fail during gather, encoding errors fail during munge. Template failures have
/// their own richer type, [`TemplateError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SharegenError {
    /// Generic configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// A required plugin option was not supplied
    #[error("Plugin '{plugin}' is missing required option '{field}'")]
    MissingField {
        /// Name of the plugin instance
        plugin: String,
        /// Canonical name of the missing option
        field: String,
    },

    /// A deprecated option and its canonical replacement disagree
    #[error("Plugin '{plugin}' sets both '{alias}' and '{field}' to different values")]
    ConflictingFields {
        /// Name of the plugin instance
        plugin: String,
        /// Deprecated option name
        alias: String,
        /// Canonical option name
        field: String,
    },

    /// Encoding label not supported by the text codec
    #[error("Unknown encoding: {encoding}")]
    UnknownEncoding {
        /// The label as written in the configuration
        encoding: String,
    },

    /// A configured path is empty, absolute or escapes its base directory
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath {
        /// The offending path
        path: String,
        /// Why it was rejected
        reason: String,
    },

    /// No share directory could be found for a distribution
    #[error("Share directory for distribution '{dist}' not found")]
    DistributionNotFound {
        /// Distribution name that was looked up
        dist: String,
        /// Directories that were searched, in order
        searched: Vec<String>,
    },

    /// The share directory exists but does not contain the requested file
    #[error("File '{path}' not found in share directory of distribution '{dist}'")]
    ResourceNotFound {
        /// Distribution name
        dist: String,
        /// Path relative to the share directory
        path: String,
        /// Share directory that was searched
        share_dir: String,
        /// Similarly named files found in that directory
        suggestions: Vec<String>,
    },

    /// Bytes read from a template are not valid in the declared encoding
    #[error("Cannot decode '{path}' as {encoding}: {reason}")]
    DecodeError {
        /// File that failed to decode
        path: String,
        /// Encoding name
        encoding: String,
        /// Position and nature of the failure
        reason: String,
    },

    /// Rendered text contains characters the declared encoding cannot represent
    #[error("Cannot encode '{file}' as {encoding}: {reason}")]
    EncodeError {
        /// Build file name
        file: String,
        /// Encoding name
        encoding: String,
        /// Position and nature of the failure
        reason: String,
    },

    /// Two plugins tried to register the same build file
    #[error("Build file '{name}' already added by '{existing}'")]
    DuplicateFile {
        /// Build file name
        name: String,
        /// Plugin that registered it first
        existing: String,
    },

    /// File system error
    #[error("File system error: {operation}")]
    FileSystemError {
        /// The file system operation that failed
        operation: String,
        /// Path where the error occurred
        path: String,
    },

    /// Other error
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// Error context wrapper that provides user-friendly error information.
///
/// Displayed as a red error line, then optional yellow details and green
/// suggestion.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: SharegenError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: SharegenError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Known error types are matched first ([`SharegenError`], [`TemplateError`],
/// [`std::io::Error`], [`toml::de::Error`]) anywhere in the error chain; anything
/// else becomes [`SharegenError::Other`] with the full cause chain appended.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(err) = error.chain().find_map(|e| e.downcast_ref::<SharegenError>()) {
        let ctx = create_error_context(err.clone());
        // Keep the outer context messages (file paths, plugin names) visible
        if ctx.details.is_none() && error.chain().count() > 1 {
            return ctx.with_details(chain_message(&error));
        }
        return ctx;
    }

    if let Some(template_error) = error.chain().find_map(|e| e.downcast_ref::<TemplateError>()) {
        let location = template_error.location();
        let mut message = error.to_string();
        if let Some(line) = location.line_number {
            message = format!("{message} ({} line {line})", location.file_name);
        }
        return ErrorContext::new(SharegenError::Other { message })
            .with_details(template_error.format_with_context())
            .with_suggestion(
                "Check template syntax: variables use {{ var }} or {{ $var }}, control flow uses {% %}. \
                 Every variable must be set in the [[generate]] table, or be 'dist' or 'plugin'",
            );
    }

    if let Some(io_error) = error.chain().find_map(|e| e.downcast_ref::<std::io::Error>()) {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(SharegenError::FileSystemError {
                    operation: error.to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check file ownership and permissions")
                .with_details(chain_message(&error));
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(SharegenError::FileSystemError {
                    operation: error.to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct")
                .with_details(chain_message(&error));
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.chain().find_map(|e| e.downcast_ref::<toml::de::Error>()) {
        return ErrorContext::new(SharegenError::ConfigError {
            message: error.to_string(),
        })
        .with_details(toml_error.to_string())
        .with_suggestion("Check the TOML syntax in sharegen.toml. Verify quotes, brackets, and table names");
    }

    ErrorContext::new(SharegenError::Other {
        message: chain_message(&error),
    })
}

/// Render an error and its causes as a single multi-line message
fn chain_message(error: &anyhow::Error) -> String {
    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    message
}

/// Attach tailored suggestions to each [`SharegenError`] variant
fn create_error_context(error: SharegenError) -> ErrorContext {
    match &error {
        SharegenError::MissingField {
            field,
            ..
        } => {
            let field = field.clone();
            ErrorContext::new(error)
                .with_suggestion(format!("Add '{field} = \"path/to/file\"' to the [[generate]] table"))
        }
        SharegenError::ConflictingFields {
            alias,
            ..
        } => {
            let alias = alias.clone();
            ErrorContext::new(error).with_suggestion(format!(
                "'{alias}' is deprecated; remove it and keep only 'destination_filename'"
            ))
        }
        SharegenError::UnknownEncoding {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Use one of: UTF-8, US-ASCII, ISO-8859-1, UTF-16LE, UTF-16BE"),
        SharegenError::InvalidPath {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Use a relative path without '..' components"),
        SharegenError::DistributionNotFound {
            searched,
            ..
        } => {
            let details = if searched.is_empty() {
                "No share directories are configured".to_string()
            } else {
                format!("Searched:\n  {}", searched.join("\n  "))
            };
            ErrorContext::new(error)
                .with_details(details)
                .with_suggestion(
                    "Add the distribution under [share.dists] in sharegen.toml, \
                     or add its parent directory to [share].paths or SHAREGEN_SHARE_PATH",
                )
        }
        SharegenError::ResourceNotFound {
            share_dir,
            suggestions,
            ..
        } => {
            let mut ctx = ErrorContext::new(error.clone())
                .with_details(format!("Share directory: {share_dir}"));
            if suggestions.is_empty() {
                ctx = ctx.with_suggestion("Check 'source_filename' in the [[generate]] table");
            } else {
                ctx = ctx.with_suggestion(format!("Did you mean: {}?", suggestions.join(", ")));
            }
            ctx
        }
        SharegenError::DecodeError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Set 'encoding' in the [[generate]] table to the template's real encoding"),
        SharegenError::EncodeError {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "Use an encoding that can represent every rendered character, such as UTF-8",
        ),
        SharegenError::DuplicateFile {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Give each [[generate]] table a distinct 'destination_filename'"),
        _ => ErrorContext::new(error),
    }
}
