//! File rows and content hashing.

use std::fmt;

use sha2::{Digest, Sha256};
use smol_str::SmolStr;

use crate::base::{FileId, LineIndex};
use crate::syntax::ParseDiagnostic;

/// A SHA-256 digest of file contents.
///
/// Used for the reindex fast path: a file whose digest matches the stored row
/// is skipped without parsing.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Digest the given contents.
    pub fn of(text: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        Self(hasher.finalize().into())
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// An indexed source file.
///
/// Rows are replaced, never mutated: a content change deletes the old row
/// (with its symbols and references) and inserts a fresh one under a new id.
/// The URI is the stable key.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub struct FileRecord {
    pub id: FileId,
    pub uri: SmolStr,
    pub hash: ContentHash,
    /// Offset ⇄ line/column conversion for this file's contents.
    pub line_index: LineIndex,
    /// Diagnostics forwarded verbatim from the parser.
    pub diagnostics: Vec<ParseDiagnostic>,
}
