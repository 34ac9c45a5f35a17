/*!
 * Core types and data structures for repo2wc
 */

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Kind of an input entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file with readable content
    File,
    /// Directory containing other entries
    Directory,
    /// Anything else (sockets, broken links, devices)
    Other,
}

/// A collected file, ready to be folded into the mount tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Forward-slash delimited path, including the top-level folder name
    pub path: String,
    /// Text content (empty when the read failed)
    pub content: String,
    /// Size in bytes as reported by the entry
    pub size: u64,
}

impl FileRecord {
    /// Create a new record
    pub fn new(path: impl Into<String>, content: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            size,
        }
    }
}

/// Insertion-ordered mapping of path segment to node
pub type MountTree = IndexMap<String, MountNode>;

/// A node of the WebContainer mount structure
///
/// Serializes to `{"file": {"contents": ...}}` or `{"directory": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MountNode {
    /// File leaf
    File {
        /// Raw text content
        contents: String,
    },
    /// Directory with its children
    Directory(MountTree),
}

impl MountNode {
    /// Empty directory node
    pub fn empty_directory() -> Self {
        Self::Directory(MountTree::new())
    }

    /// Children of a directory node, `None` for files
    pub fn children(&self) -> Option<&MountTree> {
        match self {
            Self::Directory(children) => Some(children),
            Self::File { .. } => None,
        }
    }

    /// Contents of a file node, `None` for directories
    pub fn contents(&self) -> Option<&str> {
        match self {
            Self::File { contents } => Some(contents),
            Self::Directory(_) => None,
        }
    }
}
