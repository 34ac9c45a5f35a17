/*!
 * Snippet rendering and export for repo2wc
 */

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::error::Result;
use crate::tree::{build_tree, select_mount_root};
use crate::types::{FileRecord, MountTree};

/// File name used when the snippet is downloaded
pub const DOWNLOAD_FILE_NAME: &str = "webcontainer-files.js";

/// Comment line preceding the mount call (the trailing space is part of it)
pub const MOUNT_COMMENT: &str = "// Mount to webcontainer ";

/// Literal emitted when there is no structure to mount
pub const UNDEFINED_LITERAL: &str = "undefined";

/// Render the snippet for a selected structure
///
/// ```
/// use repo2wc::writer::render_snippet;
///
/// let text = render_snippet(None).unwrap();
/// assert!(text.starts_with("const files = undefined;"));
/// ```
pub fn render_snippet(structure: Option<&MountTree>) -> Result<String> {
    let literal = match structure {
        Some(tree) => serde_json::to_string_pretty(tree)?,
        None => UNDEFINED_LITERAL.to_string(),
    };

    Ok(format!(
        "const files = {};\n\n{}\nawait webcontainerInstance.mount(files);",
        literal, MOUNT_COMMENT
    ))
}

/// A rendered snippet together with the tree it came from
#[derive(Debug, Clone)]
pub struct Snippet {
    tree: MountTree,
    text: String,
}

impl Snippet {
    /// Build the tree, select the mount root and render
    pub fn from_records(records: &[FileRecord]) -> Result<Self> {
        let tree = build_tree(records);
        let text = render_snippet(select_mount_root(&tree))?;
        Ok(Self { tree, text })
    }

    /// Snippet text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The structure that was serialized
    pub fn structure(&self) -> Option<&MountTree> {
        select_mount_root(&self.tree)
    }
}

/// Where an exported snippet goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Write to a file
    File(PathBuf),
    /// Print to standard output
    Stdout,
}

impl Default for Output {
    fn default() -> Self {
        Self::File(PathBuf::from(DOWNLOAD_FILE_NAME))
    }
}

/// Writes snippets to their destination
pub struct SnippetWriter {
    output: Output,
}

impl SnippetWriter {
    /// Create a new snippet writer
    pub fn new(output: Output) -> Self {
        Self { output }
    }

    /// Destination of this writer
    pub fn output(&self) -> &Output {
        &self.output
    }

    /// Write the snippet text byte for byte
    pub fn write(&self, snippet: &Snippet) -> io::Result<()> {
        match &self.output {
            Output::File(path) => {
                let file = File::create(path)?;
                let mut writer = BufWriter::new(file);
                writer.write_all(snippet.text().as_bytes())?;
                writer.flush()
            }
            Output::Stdout => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                handle.write_all(snippet.text().as_bytes())?;
                handle.write_all(b"\n")?;
                handle.flush()
            }
        }
    }
}
