/*!
 * repo2wc - Convert a repository directory into a WebContainer mount snippet
 *
 * Files are collected from dropped entries or a picker-style selection,
 * filtered, folded into a nested `{ file | directory }` structure and
 * rendered as a JavaScript snippet that mounts it.
 */

pub mod clipboard;
pub mod collector;
pub mod config;
pub mod entry;
pub mod error;
pub mod filter;
pub mod report;
pub mod session;
pub mod tree;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use collector::Collector;
pub use config::{CollectMode, Config};
pub use entry::{Entry, FsEntry, FsSelectedFile, MemoryEntry, MemoryFile, SelectedFile};
pub use error::{Repo2WcError, Result};
pub use session::{Conversion, Session};
pub use tree::{build_tree, select_mount_root};
pub use types::{EntryKind, FileRecord, MountNode, MountTree};
pub use writer::{render_snippet, Snippet, SnippetWriter};
