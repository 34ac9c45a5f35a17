/*!
 * Utility functions for repo2wc
 */

use crate::collector::{accepts_selected, walk_entries, WalkEvent};
use crate::entry::{Entry, SelectedFile};
use crate::filter::ExcludedPaths;

/// Count the files an entries walk will read, for progress tracking
pub fn count_entries<E: Entry>(entries: &[E], excluded: &ExcludedPaths) -> u64 {
    let mut count = 0;
    walk_entries(entries, excluded, &mut |event| {
        if let WalkEvent::File { .. } = event {
            count += 1;
        }
    });
    count
}

/// Count the files a selection will read, for progress tracking
pub fn count_selection<S: SelectedFile>(files: &[S], excluded: &ExcludedPaths) -> u64 {
    files
        .iter()
        .filter(|file| accepts_selected(*file, excluded))
        .count() as u64
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Size in kilobytes with one decimal, as shown in the file listing
pub fn format_kilobytes(size: u64) -> String {
    format!("{:.1}KB", size as f64 / 1024.0)
}
