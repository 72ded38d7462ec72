//! Strict text codecs for template files.
//!
//! Templates are read as raw bytes and decoded with the encoding named in the
//! plugin configuration; rendered output is encoded back with the same encoding.
//! Both directions are strict: invalid input is an error, never a replacement
//! character.
//!
//! # Examples
//!
//! ```rust
//! use sharegen_cli::core::Encoding;
//!
//! let enc: Encoding = "latin1".parse().unwrap();
//! assert_eq!(enc, Encoding::Latin1);
//! assert_eq!(enc.to_string(), "ISO-8859-1");
//! assert_eq!(enc.decode(b"caf\xe9").unwrap(), "café");
//! assert!(Encoding::Ascii.encode("café").is_err());
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::SharegenError;

/// A supported text encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// UTF-8 (the default)
    #[default]
    Utf8,
    /// 7-bit US-ASCII
    Ascii,
    /// ISO-8859-1, one byte per code point U+0000..=U+00FF
    Latin1,
    /// UTF-16, little endian, no byte order mark handling
    Utf16Le,
    /// UTF-16, big endian, no byte order mark handling
    Utf16Be,
}

/// Failure position and description, turned into a [`SharegenError`] by the caller
/// once it knows which file was involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecFailure {
    /// Byte offset (decode) or character index (encode) of the failure
    pub position: usize,
    /// What went wrong
    pub reason: String,
}

impl std::fmt::Display for CodecFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at position {}", self.reason, self.position)
    }
}

impl Encoding {
    /// Canonical name, as reported in configuration dumps.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::Ascii => "US-ASCII",
            Encoding::Latin1 => "ISO-8859-1",
            Encoding::Utf16Le => "UTF-16LE",
            Encoding::Utf16Be => "UTF-16BE",
        }
    }

    /// Decode bytes to text, failing on the first invalid sequence.
    pub fn decode(&self, bytes: &[u8]) -> Result<String, CodecFailure> {
        match self {
            Encoding::Utf8 => std::str::from_utf8(bytes).map(str::to_owned).map_err(|e| {
                CodecFailure {
                    position: e.valid_up_to(),
                    reason: match e.error_len() {
                        Some(len) => format!("invalid {len}-byte UTF-8 sequence"),
                        None => "truncated UTF-8 sequence".to_string(),
                    },
                }
            }),
            Encoding::Ascii => {
                if let Some(position) = bytes.iter().position(|b| !b.is_ascii()) {
                    return Err(CodecFailure {
                        position,
                        reason: format!("byte 0x{:02X} is not ASCII", bytes[position]),
                    });
                }
                Ok(bytes.iter().map(|&b| char::from(b)).collect())
            }
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Encoding::Utf16Le | Encoding::Utf16Be => {
                if bytes.len() % 2 != 0 {
                    return Err(CodecFailure {
                        position: bytes.len() - 1,
                        reason: "odd number of bytes for UTF-16".to_string(),
                    });
                }
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| match self {
                        Encoding::Utf16Le => u16::from_le_bytes([pair[0], pair[1]]),
                        _ => u16::from_be_bytes([pair[0], pair[1]]),
                    })
                    .collect();

                let mut text = String::with_capacity(units.len());
                let mut offset = 0;
                for decoded in char::decode_utf16(units.iter().copied()) {
                    match decoded {
                        Ok(c) => {
                            offset += c.len_utf16() * 2;
                            text.push(c);
                        }
                        Err(e) => {
                            return Err(CodecFailure {
                                position: offset,
                                reason: format!(
                                    "unpaired surrogate 0x{:04X}",
                                    e.unpaired_surrogate()
                                ),
                            });
                        }
                    }
                }
                Ok(text)
            }
        }
    }

    /// Encode text to bytes, failing on the first unrepresentable character.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>, CodecFailure> {
        match self {
            Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
            Encoding::Ascii => Self::encode_single_byte(text, 0x7F),
            Encoding::Latin1 => Self::encode_single_byte(text, 0xFF),
            Encoding::Utf16Le => {
                Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect())
            }
            Encoding::Utf16Be => {
                Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect())
            }
        }
    }

    fn encode_single_byte(text: &str, max: u32) -> Result<Vec<u8>, CodecFailure> {
        text.chars()
            .enumerate()
            .map(|(position, c)| {
                let code = u32::from(c);
                if code <= max {
                    // Bounded by `max`, which is at most 0xFF
                    Ok(code as u8)
                } else {
                    Err(CodecFailure {
                        position,
                        reason: format!("character {c:?} (U+{code:04X}) is not representable"),
                    })
                }
            })
            .collect()
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Encoding {
    type Err = SharegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label: String =
            s.chars().filter(|c| *c != '-' && *c != '_').collect::<String>().to_lowercase();
        match label.as_str() {
            "utf8" => Ok(Encoding::Utf8),
            "ascii" | "usascii" => Ok(Encoding::Ascii),
            "latin1" | "iso88591" => Ok(Encoding::Latin1),
            "utf16le" => Ok(Encoding::Utf16Le),
            "utf16be" => Ok(Encoding::Utf16Be),
            _ => Err(SharegenError::UnknownEncoding {
                encoding: s.to_string(),
            }),
        }
    }
}

impl Serialize for Encoding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Encoding {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        assert_eq!("UTF-8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert_eq!("utf8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert_eq!("US-ASCII".parse::<Encoding>().unwrap(), Encoding::Ascii);
        assert_eq!("ISO-8859-1".parse::<Encoding>().unwrap(), Encoding::Latin1);
        assert_eq!("Latin_1".parse::<Encoding>().unwrap(), Encoding::Latin1);
        assert_eq!("utf-16be".parse::<Encoding>().unwrap(), Encoding::Utf16Be);

        let err = "EBCDIC".parse::<Encoding>().unwrap_err();
        assert_eq!(
            err,
            SharegenError::UnknownEncoding {
                encoding: "EBCDIC".to_string()
            }
        );
    }

    #[test]
    fn test_utf8_decode_is_strict() {
        let failure = Encoding::Utf8.decode(b"ab\xffcd").unwrap_err();
        assert_eq!(failure.position, 2);

        let failure = Encoding::Utf8.decode(b"ab\xc3").unwrap_err();
        assert_eq!(failure.reason, "truncated UTF-8 sequence");
    }

    #[test]
    fn test_utf8_keeps_bom() {
        let text = Encoding::Utf8.decode(b"\xef\xbb\xbfhi").unwrap();
        assert_eq!(text, "\u{feff}hi");
    }

    #[test]
    fn test_ascii() {
        assert_eq!(Encoding::Ascii.decode(b"plain").unwrap(), "plain");
        let failure = Encoding::Ascii.decode(b"caf\xe9").unwrap_err();
        assert_eq!(failure.position, 3);

        let failure = Encoding::Ascii.encode("naïve").unwrap_err();
        assert_eq!(failure.position, 2);
    }

    #[test]
    fn test_latin1() {
        assert_eq!(Encoding::Latin1.encode("café").unwrap(), b"caf\xe9".to_vec());
        assert!(Encoding::Latin1.encode("€").is_err());
    }

    #[test]
    fn test_utf16() {
        let bytes = Encoding::Utf16Le.encode("hé").unwrap();
        assert_eq!(bytes, vec![b'h', 0, 0xe9, 0]);
        assert_eq!(Encoding::Utf16Le.decode(&bytes).unwrap(), "hé");

        let bytes = Encoding::Utf16Be.encode("h").unwrap();
        assert_eq!(bytes, vec![0, b'h']);

        assert!(Encoding::Utf16Le.decode(&[0x68]).is_err());
        // Lone high surrogate
        let failure = Encoding::Utf16Be.decode(&[0xd8, 0x00, 0x00, 0x41]).unwrap_err();
        assert_eq!(failure.position, 0);
    }

    #[test]
    fn test_serde_uses_canonical_name() {
        let json = serde_json::to_string(&Encoding::Latin1).unwrap();
        assert_eq!(json, "\"ISO-8859-1\"");
        let parsed: Encoding = serde_json::from_str("\"latin1\"").unwrap();
        assert_eq!(parsed, Encoding::Latin1);
    }
}
