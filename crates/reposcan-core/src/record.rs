//! Per-file record types.

use std::fmt;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Size recorded for a file whose metadata could not be read.
pub const UNKNOWN_SIZE: i64 = -1;

/// Prefix of the digest sentinel for files that could not be read.
const ERROR_PREFIX: &str = "ERR:";

/// SHA-256 content hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(pub [u8; 32]);

impl ContentHash {
    /// Create a new ContentHash from raw bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the hash as a hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a 64 character hex string.
    pub fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != 64 || !hex.is_ascii() {
            return None;
        }
        let mut bytes = [0u8; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
        }
        Some(Self(bytes))
    }
}

/// Digest field of a record: either the content hash or the reason it is missing.
///
/// Serialized as a plain string, the hex hash or `ERR:<description>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum FileDigest {
    /// Hash of the full file contents.
    Sha256(ContentHash),
    /// The file could not be opened or read to the end.
    Failed(String),
}

impl FileDigest {
    /// Create the error sentinel from any displayable failure.
    pub fn failed(reason: impl fmt::Display) -> Self {
        Self::Failed(reason.to_string())
    }

    /// Check if this is the error sentinel.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The content hash, if the file was read successfully.
    pub fn hash(&self) -> Option<&ContentHash> {
        match self {
            Self::Sha256(hash) => Some(hash),
            Self::Failed(_) => None,
        }
    }

    /// First `len` characters of the string form.
    pub fn short(&self, len: usize) -> String {
        self.to_string().chars().take(len).collect()
    }
}

impl fmt::Display for FileDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha256(hash) => f.write_str(&hash.to_hex()),
            Self::Failed(reason) => write!(f, "{ERROR_PREFIX}{reason}"),
        }
    }
}

impl From<FileDigest> for String {
    fn from(digest: FileDigest) -> Self {
        digest.to_string()
    }
}

impl TryFrom<String> for FileDigest {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if let Some(reason) = value.strip_prefix(ERROR_PREFIX) {
            return Ok(Self::Failed(reason.to_string()));
        }
        ContentHash::from_hex(&value)
            .map(Self::Sha256)
            .ok_or_else(|| format!("Invalid digest: {value}"))
    }
}

/// One entry of the manifest, describing a single regular file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Slash-separated path relative to the scan root.
    pub path: String,
    /// Byte length, or [`UNKNOWN_SIZE`] if metadata was unreadable.
    pub size: i64,
    /// Lowercased suffix including the dot, empty if none.
    pub extension: CompactString,
    /// Content digest or error sentinel.
    pub digest: FileDigest,
    /// Binary/text classification; false when unreadable.
    pub is_binary: bool,
    /// Lossily decoded leading text, only for small readable text files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

impl FileRecord {
    /// Create a record for a file whose contents were read.
    ///
    /// A preview is dropped when the file is classified binary.
    pub fn readable(
        path: impl Into<String>,
        size: i64,
        extension: impl Into<CompactString>,
        hash: ContentHash,
        is_binary: bool,
        preview: Option<String>,
    ) -> Self {
        Self {
            path: path.into(),
            size,
            extension: extension.into(),
            digest: FileDigest::Sha256(hash),
            is_binary,
            preview: if is_binary { None } else { preview },
        }
    }

    /// Create a record for a file that could not be opened or read.
    pub fn unreadable(
        path: impl Into<String>,
        size: i64,
        extension: impl Into<CompactString>,
        reason: impl fmt::Display,
    ) -> Self {
        Self {
            path: path.into(),
            size,
            extension: extension.into(),
            digest: FileDigest::failed(reason),
            is_binary: false,
            preview: None,
        }
    }

    /// Size in bytes, if it is known.
    pub fn known_size(&self) -> Option<u64> {
        u64::try_from(self.size).ok()
    }
}
