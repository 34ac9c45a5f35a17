/*!
 * Skip rules applied while collecting files
 *
 * Directory names are compared exactly and only consulted while descending
 * into directories. File patterns are unanchored and tested against the whole
 * relative path, so they also catch files below skipped directory names when
 * no directory walk happened (file picker selections).
 */

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::RegexSet;

/// Directory names whose whole subtree is skipped
pub const SKIP_DIRECTORIES: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    ".vscode",
    ".idea",
    "coverage",
    ".nyc_output",
    ".cache",
];

/// Patterns matched anywhere in a file's relative path
pub const SKIP_FILE_PATTERNS: &[&str] = &[
    // Version control & dependencies
    r"node_modules",
    r"\.git",
    // Build output & caches
    r"dist",
    r"build",
    r"coverage",
    r"\.nyc_output",
    r"\.cache",
    // OS files
    r"\.DS_Store",
    r"(?i)thumbs\.db",
    r"(?i)ehthumbs\.db",
    r"(?i)desktop\.ini",
    // Environment
    r"\.env(\..*)?",
    // IDEs & editors
    r"\.vscode",
    r"\.idea",
    r"\.editorconfig",
    // Lock files & logs
    r"package-lock\.json",
    r"yarn\.lock",
    r"pnpm-lock\.yaml",
    r"\.lock$",
    r"\.log$",
];

static FILE_PATTERN_SET: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new(SKIP_FILE_PATTERNS).expect("built-in skip patterns are valid regexes")
});

/// Check whether a directory should be skipped by its bare name
pub fn should_skip_directory(name: &str) -> bool {
    SKIP_DIRECTORIES.contains(&name)
}

/// Check whether a file should be skipped by its relative path
pub fn should_skip_file(path: &str) -> bool {
    FILE_PATTERN_SET.is_match(path)
}

/// Concrete files kept out of a run, such as the snippet being written
#[derive(Debug, Clone, Default)]
pub struct ExcludedPaths {
    paths: Vec<PathBuf>,
}

impl ExcludedPaths {
    /// Empty exclusion list
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude a file; it does not have to exist yet
    pub fn add(&mut self, path: &Path) {
        if let Some(resolved) = resolve(path) {
            self.paths.push(resolved);
        }
    }

    /// Check whether a file on disk is excluded
    pub fn contains(&self, location: &Path) -> bool {
        let name = location.file_name();
        if name.is_none() || !self.paths.iter().any(|p| p.file_name() == name) {
            return false;
        }

        resolve(location).map_or(false, |resolved| self.paths.contains(&resolved))
    }
}

// Canonical parent joined with the file name, so missing files resolve too
fn resolve(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Some(fs::canonicalize(parent).ok()?.join(name))
}
