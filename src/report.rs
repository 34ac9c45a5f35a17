/*!
 * Reporting functionality for repo2wc
 *
 * Renders the processed-files listing and a run summary with the tabled
 * library.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::session::Conversion;
use crate::utils::{format_file_size, format_kilobytes};

/// Number of files listed before the rest is summarized
pub const LISTED_FILES: usize = 10;

/// Summary of a conversion run
#[derive(Debug, Clone)]
pub struct ConversionReport {
    /// Where the snippet went
    pub output: String,
    /// Time taken to collect and render
    pub duration: Duration,
    /// Listed files: path and size in bytes
    pub files: Vec<(String, u64)>,
    /// Files dropped by path patterns
    pub files_skipped: usize,
    /// Directories pruned by name
    pub directories_skipped: usize,
    /// Files read as empty after a failure
    pub read_failures: usize,
    /// Whether the snippet reached the clipboard, if a copy was requested
    pub copied: Option<bool>,
}

impl ConversionReport {
    /// Summarize a conversion
    pub fn new(conversion: &Conversion, output: String, duration: Duration) -> Self {
        Self {
            output,
            duration,
            files: conversion
                .records
                .iter()
                .map(|r| (r.path.clone(), r.size))
                .collect(),
            files_skipped: conversion.statistics.files_skipped,
            directories_skipped: conversion.statistics.directories_skipped,
            read_failures: conversion.statistics.read_failures,
            copied: None,
        }
    }

    fn total_size(&self) -> u64 {
        self.files.iter().map(|(_, size)| size).sum()
    }
}

/// Report generator for conversion runs
pub struct Reporter {
    max_path_len: usize,
}

impl Default for Reporter {
    fn default() -> Self {
        Self { max_path_len: 60 }
    }
}

impl Reporter {
    /// Create a new reporter
    pub fn new() -> Self {
        Self::default()
    }

    /// Print the report to stderr, keeping stdout free for the snippet
    pub fn print_report(&self, report: &ConversionReport) {
        eprintln!("\n{}", self.generate_report(report));
    }

    /// Generate the report text
    pub fn generate_report(&self, report: &ConversionReport) -> String {
        let mut text = format!("📋  PROCESSED FILES ({})\n", report.files.len());

        if report.files.is_empty() {
            text.push_str("No files were collected\n");
        } else {
            text.push_str(&self.create_files_table(report));
            text.push('\n');
            if report.files.len() > LISTED_FILES {
                text.push_str(&format!(
                    "... and {} more files\n",
                    report.files.len() - LISTED_FILES
                ));
            }
        }

        text.push_str("\n✅  CONVERSION COMPLETE\n");
        text.push_str(&self.create_summary_table(report));
        text
    }

    // Keep the last path segments that fit
    fn format_path(&self, path: &str) -> String {
        let max_len = self.max_path_len;
        if path.chars().count() <= max_len {
            return path.to_string();
        }

        let mut segments = Vec::new();
        let mut current_len = 3;
        for part in path.rsplit('/') {
            let part_len = part.chars().count() + 1;
            if current_len + part_len > max_len {
                break;
            }
            segments.push(part);
            current_len += part_len;
        }

        if segments.is_empty() {
            let tail: String = path
                .chars()
                .rev()
                .take(max_len.saturating_sub(3))
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            return format!("...{}", tail);
        }

        let mut result = String::from("...");
        for part in segments.iter().rev() {
            result.push('/');
            result.push_str(part);
        }
        result
    }

    fn create_files_table(&self, report: &ConversionReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Size")]
            size: String,
        }

        let rows: Vec<FileRow> = report
            .files
            .iter()
            .take(LISTED_FILES)
            .map(|(path, size)| FileRow {
                path: self.format_path(path),
                size: format_kilobytes(*size),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn create_summary_table(&self, report: &ConversionReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let mut rows = vec![
            SummaryRow {
                key: "📂 Output".to_string(),
                value: report.output.clone(),
            },
            SummaryRow {
                key: "⏱️ Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "📄 Files Collected".to_string(),
                value: report.files.len().to_string(),
            },
            SummaryRow {
                key: "📦 Total Size".to_string(),
                value: format_file_size(report.total_size()),
            },
            SummaryRow {
                key: "🚫 Skipped".to_string(),
                value: format!(
                    "{} files, {} directories",
                    report.files_skipped, report.directories_skipped
                ),
            },
        ];

        if report.read_failures > 0 {
            rows.push(SummaryRow {
                key: "⚠️ Unreadable (empty)".to_string(),
                value: report.read_failures.to_string(),
            });
        }

        if let Some(copied) = report.copied {
            rows.push(SummaryRow {
                key: "📋 Clipboard".to_string(),
                value: if copied { "Copied!" } else { "Copy failed" }.to_string(),
            });
        }

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with(count: usize) -> ConversionReport {
        ConversionReport {
            output: "webcontainer-files.js".to_string(),
            duration: Duration::from_millis(5),
            files: (0..count)
                .map(|i| (format!("repo/src/file{}.ts", i), 2048))
                .collect(),
            files_skipped: 3,
            directories_skipped: 1,
            read_failures: 0,
            copied: None,
        }
    }

    #[test]
    fn test_lists_first_ten_files() {
        let text = Reporter::new().generate_report(&report_with(12));

        assert!(text.contains("PROCESSED FILES (12)"));
        assert!(text.contains("repo/src/file9.ts"));
        assert!(!text.contains("repo/src/file10.ts"));
        assert!(text.contains("... and 2 more files"));
        assert!(text.contains("2.0KB"));
        assert!(text.contains("3 files, 1 directories"));
    }

    #[test]
    fn test_short_listing_has_no_remainder_line() {
        let text = Reporter::new().generate_report(&report_with(3));
        assert!(!text.contains("more files"));
    }

    #[test]
    fn test_empty_listing() {
        let text = Reporter::new().generate_report(&report_with(0));
        assert!(text.contains("PROCESSED FILES (0)"));
        assert!(text.contains("No files were collected"));
    }

    #[test]
    fn test_clipboard_row() {
        let mut report = report_with(1);
        report.copied = Some(false);
        assert!(Reporter::new().generate_report(&report).contains("Copy failed"));
    }

    #[test]
    fn test_format_path_truncates_from_the_left() {
        let reporter = Reporter { max_path_len: 20 };
        assert_eq!(reporter.format_path("repo/a.ts"), "repo/a.ts");
        assert_eq!(
            reporter.format_path("repo/very/deep/nested/dir/file.ts"),
            ".../dir/file.ts"
        );
        assert_eq!(
            reporter.format_path("an_extremely_long_single_segment.ts"),
            "...single_segment.ts"
        );
    }
}
