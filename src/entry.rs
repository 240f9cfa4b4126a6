//! # Entry Records
//!
//! The resolved output of the file pipeline: a named, permission-tagged
//! union of file and directory records. Entries are constructed purely in
//! memory during serialization; no I/O happens until a
//! [`DiskWriter`](crate::writer::DiskWriter) consumes them.
//!
//! ## Interchange Shape
//!
//! An [`Entry`] encodes as `{name, permissions, type: file|directory,
//! payload}` and round-trips through JSON preserving structural equality:
//!
//! ```
//! use treecompose::entry::{self, Entry};
//!
//! let tree = Entry::directory("docs", vec![Entry::text_file("index.md", "# Docs")]);
//! let json = entry::to_json(&tree).unwrap();
//! assert_eq!(entry::from_json(&json).unwrap(), tree);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::permissions::Permissions;

/// The content of a file entry: text written as UTF-8, or raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileContent {
    /// Textual content, encoded as UTF-8 on disk.
    Text(String),
    /// Raw binary content.
    Bytes(Vec<u8>),
}

impl FileContent {
    /// The on-disk byte representation.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Text(text) => text.as_bytes().to_vec(),
            Self::Bytes(bytes) => bytes.clone(),
        }
    }

    /// The on-disk size in bytes.
    pub fn len(&self) -> usize {
        match self {
            Self::Text(text) => text.len(),
            Self::Bytes(bytes) => bytes.len(),
        }
    }

    /// Whether the content is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What an entry materializes as: a file with content, or a directory with
/// an ordered list of child entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum Payload {
    File(FileContent),
    Directory(Vec<Entry>),
}

/// A resolved file-or-directory record, not yet written to disk.
///
/// Within any single directory level, sibling names must be pairwise
/// distinct; the writer validates this for the entire tree before the first
/// byte hits disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// The entry's name within its parent directory.
    pub name: String,
    /// Permission bits applied when the entry is materialized.
    pub permissions: Permissions,
    /// File content or child entries.
    #[serde(flatten)]
    pub payload: Payload,
}

impl Entry {
    /// Create a file entry with explicit content and default permissions.
    pub fn file(name: impl Into<String>, content: FileContent) -> Self {
        Self {
            name: name.into(),
            permissions: Permissions::FILE_DEFAULT,
            payload: Payload::File(content),
        }
    }

    /// Create a UTF-8 text file entry.
    pub fn text_file(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::file(name, FileContent::Text(text.into()))
    }

    /// Create a binary file entry.
    pub fn binary_file(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::file(name, FileContent::Bytes(bytes))
    }

    /// Create a directory entry with ordered children and default
    /// directory permissions.
    pub fn directory(name: impl Into<String>, children: Vec<Entry>) -> Self {
        Self {
            name: name.into(),
            permissions: Permissions::DIRECTORY_DEFAULT,
            payload: Payload::Directory(children),
        }
    }

    /// Replace the entry's permissions.
    pub fn with_permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = permissions;
        self
    }

    /// Whether this entry is a file.
    pub fn is_file(&self) -> bool {
        matches!(self.payload, Payload::File(_))
    }

    /// Whether this entry is a directory.
    pub fn is_directory(&self) -> bool {
        matches!(self.payload, Payload::Directory(_))
    }
}

/// Encode an entry tree as pretty-printed JSON.
pub fn to_json(entry: &Entry) -> Result<String> {
    Ok(serde_json::to_string_pretty(entry)?)
}

/// Decode an entry tree from JSON.
pub fn from_json(json: &str) -> Result<Entry> {
    Ok(serde_json::from_str(json)?)
}
