//! In-memory build files.

use crate::core::{Encoding, SharegenError};

/// Content of a build file.
///
/// Gathered files start as [`FileContent::Text`]. Once rendered they hold the
/// encoded [`FileContent::Bytes`], unless the host manages encoding itself, in
/// which case they stay as text and are encoded on write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Decoded text
    Text(String),
    /// Encoded bytes, written verbatim
    Bytes(Vec<u8>),
}

/// A named file that will be written into the build output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildFile {
    /// Destination path relative to the build root, also the registry key
    pub name: String,
    /// Current content
    pub content: FileContent,
    /// Encoding tag carried alongside the content
    pub encoding: Encoding,
    /// Name of the plugin that created the file
    pub added_by: String,
}

impl BuildFile {
    /// Create a text file.
    pub fn text(
        name: impl Into<String>,
        content: impl Into<String>,
        encoding: Encoding,
        added_by: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            content: FileContent::Text(content.into()),
            encoding,
            added_by: added_by.into(),
        }
    }

    /// Text content, if the file has not been encoded yet.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match &self.content {
            FileContent::Text(text) => Some(text),
            FileContent::Bytes(_) => None,
        }
    }

    /// Bytes that would be written for this file.
    ///
    /// Text content is encoded with the file's own encoding, strictly.
    pub fn encoded_bytes(&self) -> Result<Vec<u8>, SharegenError> {
        match &self.content {
            FileContent::Bytes(bytes) => Ok(bytes.clone()),
            FileContent::Text(text) => {
                self.encoding.encode(text).map_err(|failure| SharegenError::EncodeError {
                    file: self.name.clone(),
                    encoding: self.encoding.to_string(),
                    reason: failure.to_string(),
                })
            }
        }
    }
}
