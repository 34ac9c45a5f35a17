/*!
 * File collection: walks entries or selections and produces file records
 */

use std::io;
use std::sync::{Arc, Mutex};

use indicatif::ProgressBar;
use rayon::prelude::*;

use crate::entry::{Entry, SelectedFile};
use crate::filter::{should_skip_directory, should_skip_file, ExcludedPaths};
use crate::types::{EntryKind, FileRecord};

/// Collector statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectorStatistics {
    /// Number of records produced
    pub files_collected: usize,
    /// Files dropped by the path patterns or the exclusion list
    pub files_skipped: usize,
    /// Directories pruned by name
    pub directories_skipped: usize,
    /// Files whose content could not be read
    pub read_failures: usize,
}

/// What the entry walk found
pub enum WalkEvent<'a, E> {
    /// An accepted file and its relative path
    File { path: String, entry: &'a E },
    /// A file dropped by a skip rule
    SkippedFile(String),
    /// A directory pruned by name
    SkippedDirectory(String),
}

/// Walk dropped entries recursively, applying the skip rules
///
/// Root entries have their bare name as path, children get the parent path
/// and a `/` in front. Children are visited one after another in enumeration
/// order.
pub fn walk_entries<E, F>(entries: &[E], excluded: &ExcludedPaths, visit: &mut F)
where
    E: Entry,
    F: FnMut(WalkEvent<'_, E>),
{
    for entry in entries {
        walk_entry(entry, "", excluded, visit);
    }
}

fn walk_entry<E, F>(entry: &E, prefix: &str, excluded: &ExcludedPaths, visit: &mut F)
where
    E: Entry,
    F: FnMut(WalkEvent<'_, E>),
{
    let full_path = format!("{}{}", prefix, entry.name());

    match entry.kind() {
        EntryKind::File => {
            let is_excluded = entry.location().map_or(false, |l| excluded.contains(l));
            if is_excluded || should_skip_file(&full_path) {
                visit(WalkEvent::SkippedFile(full_path));
            } else {
                visit(WalkEvent::File {
                    path: full_path,
                    entry,
                });
            }
        }
        EntryKind::Directory => {
            if should_skip_directory(entry.name()) {
                visit(WalkEvent::SkippedDirectory(full_path));
                return;
            }

            let children = match entry.children() {
                Ok(children) => children,
                Err(e) => {
                    log::warn!("Failed to list directory {}: {}", full_path, e);
                    return;
                }
            };

            let child_prefix = format!("{}/", full_path);
            for child in &children {
                walk_entry(child, &child_prefix, excluded, visit);
            }
        }
        EntryKind::Other => {
            log::debug!(
                "Skipping {}: not a regular file or directory (or a linked directory)",
                full_path
            );
        }
    }
}

/// Whether a selected file passes the path patterns and the exclusion list
pub fn accepts_selected<S: SelectedFile>(file: &S, excluded: &ExcludedPaths) -> bool {
    let is_excluded = file.location().map_or(false, |l| excluded.contains(l));
    !is_excluded && !should_skip_file(file.path())
}

/// Collects file records from dropped entries or picker selections
pub struct Collector {
    /// Progress bar
    pub progress: Arc<ProgressBar>,
    /// Files never collected, such as the output file
    excluded: ExcludedPaths,
    /// Collector statistics
    statistics: Arc<Mutex<CollectorStatistics>>,
}

impl Collector {
    /// Create a new collector
    pub fn new(progress: Arc<ProgressBar>) -> Self {
        Self {
            progress,
            excluded: ExcludedPaths::new(),
            statistics: Arc::new(Mutex::new(CollectorStatistics::default())),
        }
    }

    /// Collector without visible progress
    pub fn hidden() -> Self {
        Self::new(Arc::new(ProgressBar::hidden()))
    }

    /// Keep the given files out of every run
    pub fn with_excluded(mut self, excluded: ExcludedPaths) -> Self {
        self.excluded = excluded;
        self
    }

    /// Get statistics of the latest run
    pub fn get_statistics(&self) -> CollectorStatistics {
        self.statistics
            .lock()
            .map(|stats| stats.clone())
            .unwrap_or_default()
    }

    /// Walk dropped entries recursively and read every accepted file
    ///
    /// Records come out in traversal order.
    pub fn collect_entries<E: Entry>(&self, entries: &[E]) -> Vec<FileRecord> {
        self.reset_statistics();

        let mut records = Vec::new();
        walk_entries(entries, &self.excluded, &mut |event| match event {
            WalkEvent::File { path, entry } => {
                records.push(self.read_record(path, entry.size(), entry.read()));
            }
            WalkEvent::SkippedFile(path) => {
                log::debug!("Skipping file {}", path);
                self.update_statistics(|stats| stats.files_skipped += 1);
            }
            WalkEvent::SkippedDirectory(path) => {
                log::debug!("Skipping directory {}", path);
                self.update_statistics(|stats| stats.directories_skipped += 1);
            }
        });
        records
    }

    /// Read a flat selection; only the path patterns apply
    ///
    /// Reads run in parallel, the result keeps selection order.
    pub fn collect_selection<S: SelectedFile>(&self, files: &[S]) -> Vec<FileRecord> {
        self.reset_statistics();

        files
            .par_iter()
            .filter_map(|file| {
                if !accepts_selected(file, &self.excluded) {
                    log::debug!("Skipping file {}", file.path());
                    self.update_statistics(|stats| stats.files_skipped += 1);
                    return None;
                }

                Some(self.read_record(file.path().to_string(), file.size(), file.read()))
            })
            .collect()
    }

    /// Turn a read result into a record, substituting empty content on failure
    fn read_record(&self, path: String, size: u64, data: io::Result<Vec<u8>>) -> FileRecord {
        self.progress.inc(1);
        self.progress.set_message(format!("Current file: {}", path));

        let content = match data {
            Ok(bytes) => decode_text(&bytes),
            Err(e) => {
                log::warn!("Failed to read {}: {}", path, e);
                self.update_statistics(|stats| stats.read_failures += 1);
                String::new()
            }
        };

        self.update_statistics(|stats| stats.files_collected += 1);
        FileRecord::new(path, content, size)
    }

    fn reset_statistics(&self) {
        self.update_statistics(|stats| *stats = CollectorStatistics::default());
    }

    fn update_statistics(&self, update: impl FnOnce(&mut CollectorStatistics)) {
        if let Ok(mut stats) = self.statistics.lock() {
            update(&mut stats);
        }
    }
}

/// Decode bytes as UTF-8 text, replacing invalid sequences
///
/// A leading byte order mark is dropped.
pub fn decode_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text.into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{MemoryEntry, MemoryFile};

    fn paths(records: &[FileRecord]) -> Vec<&str> {
        records.iter().map(|r| r.path.as_str()).collect()
    }

    #[test]
    fn test_collect_entries_prefixes_parent_names() {
        let entries = vec![MemoryEntry::directory(
            "repo",
            vec![
                MemoryEntry::file("package.json", "{}"),
                MemoryEntry::directory(
                    "src",
                    vec![MemoryEntry::directory(
                        "lib",
                        vec![MemoryEntry::file("util.ts", "export const x = 1;")],
                    )],
                ),
            ],
        )];

        let collector = Collector::hidden();
        let records = collector.collect_entries(&entries);

        assert_eq!(paths(&records), vec!["repo/package.json", "repo/src/lib/util.ts"]);
        assert_eq!(records[1].content, "export const x = 1;");
        assert_eq!(records[1].size, 19);
    }

    #[test]
    fn test_skipped_directory_hides_all_descendants() {
        let entries = vec![MemoryEntry::directory(
            "repo",
            vec![
                MemoryEntry::directory(
                    "node_modules",
                    vec![MemoryEntry::directory(
                        "lib",
                        vec![MemoryEntry::file("index.js", "module.exports = {}")],
                    )],
                ),
                MemoryEntry::directory(
                    ".idea",
                    vec![MemoryEntry::file("readme.md", "plain name")],
                ),
                MemoryEntry::file("index.ts", ""),
            ],
        )];

        let collector = Collector::hidden();
        let records = collector.collect_entries(&entries);

        assert_eq!(paths(&records), vec!["repo/index.ts"]);
        let stats = collector.get_statistics();
        assert_eq!(stats.directories_skipped, 2);
        assert_eq!(stats.files_collected, 1);
    }

    #[test]
    fn test_skip_patterns_apply_in_entries_mode() {
        let entries = vec![MemoryEntry::directory(
            "repo",
            vec![
                MemoryEntry::file(".env.local", "SECRET=1"),
                MemoryEntry::file("yarn.lock", ""),
                MemoryEntry::file("debug.log", ""),
                MemoryEntry::file("main.ts", "run()"),
            ],
        )];

        let collector = Collector::hidden();
        let records = collector.collect_entries(&entries);

        assert_eq!(paths(&records), vec!["repo/main.ts"]);
        assert_eq!(collector.get_statistics().files_skipped, 3);
    }

    #[test]
    fn test_root_directory_name_is_checked() {
        let entries = vec![
            MemoryEntry::directory("dist", vec![MemoryEntry::file("a.js", "")]),
            MemoryEntry::file("notes.md", "top level"),
        ];

        let records = Collector::hidden().collect_entries(&entries);
        assert_eq!(paths(&records), vec!["notes.md"]);
    }

    #[test]
    fn test_read_failure_yields_empty_content() {
        let entries = vec![MemoryEntry::directory(
            "repo",
            vec![
                MemoryEntry::unreadable("locked.ts", 42),
                MemoryEntry::file("open.ts", "ok"),
            ],
        )];

        let collector = Collector::hidden();
        let records = collector.collect_entries(&entries);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], FileRecord::new("repo/locked.ts", "", 42));
        assert_eq!(records[1].content, "ok");
        assert_eq!(collector.get_statistics().read_failures, 1);
    }

    #[test]
    fn test_empty_input_yields_no_records() {
        let collector = Collector::hidden();
        assert!(collector.collect_entries::<MemoryEntry>(&[]).is_empty());
        assert!(collector.collect_selection::<MemoryFile>(&[]).is_empty());
    }

    #[test]
    fn test_collect_selection_keeps_order_and_skips_patterns() {
        let files: Vec<MemoryFile> = (0..50)
            .map(|i| MemoryFile::with_relative_path(format!("repo/src/f{:02}.ts", i), i.to_string()))
            .chain([
                MemoryFile::with_relative_path("repo/node_modules/lib/index.js", "x"),
                MemoryFile::with_relative_path("repo/.env", "KEY=1"),
                MemoryFile::new("standalone.txt", "bare"),
            ])
            .collect();

        let collector = Collector::hidden();
        let records = collector.collect_selection(&files);

        assert_eq!(records.len(), 51);
        for (i, record) in records.iter().take(50).enumerate() {
            assert_eq!(record.path, format!("repo/src/f{:02}.ts", i));
            assert_eq!(record.content, i.to_string());
        }
        assert_eq!(records[50].path, "standalone.txt");
        assert_eq!(collector.get_statistics().files_skipped, 2);
    }

    #[test]
    fn test_selection_does_not_prune_directories_by_name() {
        // Only path patterns apply, and `build` matches anywhere in the path
        let files = vec![
            MemoryFile::with_relative_path("repo/out/app.js", "a"),
            MemoryFile::with_relative_path("repo/build/app.js", "b"),
        ];

        let records = Collector::hidden().collect_selection(&files);
        assert_eq!(paths(&records), vec!["repo/out/app.js"]);
    }

    #[test]
    fn test_statistics_reset_between_runs() {
        let collector = Collector::hidden();
        collector.collect_selection(&[MemoryFile::with_relative_path("repo/.env", "")]);
        assert_eq!(collector.get_statistics().files_skipped, 1);

        collector.collect_selection(&[MemoryFile::with_relative_path("repo/a.ts", "")]);
        let stats = collector.get_statistics();
        assert_eq!(stats.files_skipped, 0);
        assert_eq!(stats.files_collected, 1);
    }

    #[test]
    fn test_excluded_files_are_skipped_in_both_modes() -> io::Result<()> {
        use crate::entry::{select_directory, FsEntry};
        use std::fs;

        let temp_dir = tempfile::tempdir()?;
        let repo = temp_dir.path().join("repo");
        fs::create_dir(&repo)?;
        fs::write(repo.join("a.ts"), "x")?;
        fs::write(repo.join("webcontainer-files.js"), "const files = undefined;")?;

        let mut excluded = ExcludedPaths::new();
        excluded.add(&repo.join("webcontainer-files.js"));
        let collector = Collector::hidden().with_excluded(excluded);

        let records = collector.collect_entries(&[FsEntry::new(&repo)]);
        assert_eq!(paths(&records), vec!["repo/a.ts"]);
        assert_eq!(collector.get_statistics().files_skipped, 1);

        let records = collector.collect_selection(&select_directory(&repo).unwrap());
        assert_eq!(paths(&records), vec!["repo/a.ts"]);
        Ok(())
    }

    #[test]
    fn test_walk_reports_every_decision() {
        let entries = vec![MemoryEntry::directory(
            "repo",
            vec![
                MemoryEntry::directory("dist", vec![MemoryEntry::file("a.js", "")]),
                MemoryEntry::file(".env", ""),
                MemoryEntry::file("main.ts", ""),
            ],
        )];

        let mut seen = Vec::new();
        walk_entries(&entries, &ExcludedPaths::new(), &mut |event| {
            seen.push(match event {
                WalkEvent::File { path, .. } => format!("file {}", path),
                WalkEvent::SkippedFile(path) => format!("skip {}", path),
                WalkEvent::SkippedDirectory(path) => format!("prune {}", path),
            })
        });

        assert_eq!(
            seen,
            vec!["prune repo/dist", "skip repo/.env", "file repo/main.ts"]
        );
    }

    #[test]
    fn test_decode_text() {
        assert_eq!(decode_text(b"plain"), "plain");
        assert_eq!(decode_text("\u{feff}bom".as_bytes()), "bom");
        assert_eq!(decode_text(&[b'a', 0xff, b'b']), "a\u{fffd}b");
    }
}
