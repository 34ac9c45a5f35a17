/*!
 * Input entries for the collector
 *
 * `Entry` models a dropped file or directory that can be walked recursively.
 * `SelectedFile` models one item of a flat file-picker selection, which
 * already knows its relative path.
 */

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;
use crate::types::EntryKind;

/// A file or directory handed to the collector
pub trait Entry: Sized + Sync {
    /// Bare name of the entry
    fn name(&self) -> &str;

    /// Whether this is a file, a directory or something else
    fn kind(&self) -> EntryKind;

    /// Size in bytes (0 for directories or when unknown)
    fn size(&self) -> u64;

    /// Read the full content of a file entry
    fn read(&self) -> io::Result<Vec<u8>>;

    /// Enumerate the direct children of a directory entry
    fn children(&self) -> io::Result<Vec<Self>>;

    /// Location on disk, for entries backed by the file system
    fn location(&self) -> Option<&Path> {
        None
    }
}

/// A file from a flat selection
pub trait SelectedFile: Sync {
    /// Bare file name
    fn name(&self) -> &str;

    /// Path relative to the selected directory, if the selection was directory-scoped
    fn relative_path(&self) -> Option<&str>;

    /// Size in bytes
    fn size(&self) -> u64;

    /// Read the full content
    fn read(&self) -> io::Result<Vec<u8>>;

    /// Location on disk, for files backed by the file system
    fn location(&self) -> Option<&Path> {
        None
    }

    /// Relative path when known, bare name otherwise
    fn path(&self) -> &str {
        match self.relative_path() {
            Some(path) if !path.is_empty() => path,
            _ => self.name(),
        }
    }
}

fn entry_name(path: &Path) -> String {
    let resolved = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    resolved
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// An entry backed by the local file system
///
/// Symbolic links are followed only for the entry given on the command line.
/// Below it, a link to a file reads the target and a link to a directory is
/// not descended into.
#[derive(Debug, Clone)]
pub struct FsEntry {
    path: PathBuf,
    name: String,
    is_root: bool,
}

impl FsEntry {
    /// Create an entry for a path; `.` and similar resolve to the real directory name
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self {
            name: entry_name(path),
            path: path.to_path_buf(),
            is_root: true,
        }
    }
}

impl Entry for FsEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EntryKind {
        let metadata = if self.is_root {
            fs::metadata(&self.path)
        } else {
            fs::symlink_metadata(&self.path)
        };

        match metadata {
            Ok(metadata) if metadata.file_type().is_symlink() => {
                match fs::metadata(&self.path) {
                    Ok(target) if target.is_file() => EntryKind::File,
                    _ => EntryKind::Other,
                }
            }
            Ok(metadata) if metadata.is_dir() => EntryKind::Directory,
            Ok(metadata) if metadata.is_file() => EntryKind::File,
            _ => EntryKind::Other,
        }
    }

    fn size(&self) -> u64 {
        fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        fs::read(&self.path)
    }

    fn children(&self) -> io::Result<Vec<Self>> {
        let mut children = Vec::new();

        for entry in WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            children.push(Self {
                name: entry.file_name().to_string_lossy().to_string(),
                path: entry.into_path(),
                is_root: false,
            });
        }

        Ok(children)
    }

    fn location(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

#[derive(Debug, Clone)]
enum MemoryBody {
    File { data: Option<Vec<u8>>, size: u64 },
    Directory(Vec<MemoryEntry>),
}

/// An entry held entirely in memory
#[derive(Debug, Clone)]
pub struct MemoryEntry {
    name: String,
    body: MemoryBody,
}

impl MemoryEntry {
    /// File with the given content
    pub fn file(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        let data = content.into();
        Self {
            name: name.into(),
            body: MemoryBody::File {
                size: data.len() as u64,
                data: Some(data),
            },
        }
    }

    /// File whose reads always fail
    pub fn unreadable(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            body: MemoryBody::File { data: None, size },
        }
    }

    /// Directory with the given children, in enumeration order
    pub fn directory(name: impl Into<String>, children: Vec<MemoryEntry>) -> Self {
        Self {
            name: name.into(),
            body: MemoryBody::Directory(children),
        }
    }
}

impl Entry for MemoryEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EntryKind {
        match self.body {
            MemoryBody::File { .. } => EntryKind::File,
            MemoryBody::Directory(_) => EntryKind::Directory,
        }
    }

    fn size(&self) -> u64 {
        match self.body {
            MemoryBody::File { size, .. } => size,
            MemoryBody::Directory(_) => 0,
        }
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        match &self.body {
            MemoryBody::File { data: Some(data), .. } => Ok(data.clone()),
            MemoryBody::File { data: None, .. } => Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is not readable", self.name),
            )),
            MemoryBody::Directory(_) => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{} is a directory", self.name),
            )),
        }
    }

    fn children(&self) -> io::Result<Vec<Self>> {
        match &self.body {
            MemoryBody::Directory(children) => Ok(children.clone()),
            MemoryBody::File { .. } => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{} is not a directory", self.name),
            )),
        }
    }
}

/// A selected file on the local file system
#[derive(Debug, Clone)]
pub struct FsSelectedFile {
    path: PathBuf,
    name: String,
    relative_path: Option<String>,
}

impl FsSelectedFile {
    /// Select a single file without a relative path
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self {
            name: entry_name(path),
            path: path.to_path_buf(),
            relative_path: None,
        }
    }
}

impl SelectedFile for FsSelectedFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn relative_path(&self) -> Option<&str> {
        self.relative_path.as_deref()
    }

    fn size(&self) -> u64 {
        fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        fs::read(&self.path)
    }

    fn location(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

/// A selected file held in memory
#[derive(Debug, Clone)]
pub struct MemoryFile {
    name: String,
    relative_path: Option<String>,
    data: Option<Vec<u8>>,
    size: u64,
}

impl MemoryFile {
    /// File known only by its name
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        let data = content.into();
        Self {
            name: name.into(),
            relative_path: None,
            size: data.len() as u64,
            data: Some(data),
        }
    }

    /// File carrying a relative path; the name is its last segment
    pub fn with_relative_path(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or_default().to_string();
        Self {
            relative_path: Some(path),
            ..Self::new(name, content)
        }
    }

    /// File carrying a relative path whose reads always fail
    pub fn unreadable(path: impl Into<String>, size: u64) -> Self {
        Self {
            data: None,
            size,
            ..Self::with_relative_path(path, Vec::new())
        }
    }
}

impl SelectedFile for MemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn relative_path(&self) -> Option<&str> {
        self.relative_path.as_deref()
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        self.data.clone().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is not readable", self.path()),
            )
        })
    }
}

/// List every regular file below `root` the way a directory-scoped picker does
///
/// Relative paths start with the root directory's own name. No directory is
/// pruned here; only the file-path rule applies later. Links to files are
/// selected, links to directories are not walked.
pub fn select_directory(root: &Path) -> Result<Vec<FsSelectedFile>> {
    let root_name = entry_name(root);
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry below {}: {}", root.display(), e);
                continue;
            }
        };

        // walkdir does not descend into linked directories; `is_file` follows file links
        if !entry.path().is_file() {
            continue;
        }

        let relative = match entry.path().strip_prefix(root) {
            Ok(relative) => relative,
            Err(_) => continue,
        };
        let mut relative_path = root_name.clone();
        for component in relative.components() {
            relative_path.push('/');
            relative_path.push_str(&component.as_os_str().to_string_lossy());
        }

        files.push(FsSelectedFile {
            name: entry.file_name().to_string_lossy().to_string(),
            path: entry.into_path(),
            relative_path: Some(relative_path),
        });
    }

    Ok(files)
}

/// Build a picker selection from command-line paths
///
/// Directories expand through [`select_directory`]; plain files are selected
/// by name only.
pub fn select_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<FsSelectedFile>> {
    let mut files = Vec::new();

    for path in paths {
        let path = path.as_ref();
        if path.is_dir() {
            files.extend(select_directory(path)?);
        } else {
            files.push(FsSelectedFile::new(path));
        }
    }

    Ok(files)
}
