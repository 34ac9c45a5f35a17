/*!
 * Conversion session: runs the collector and builder, keeps the latest result
 *
 * Each run is a request (entries or a selection) and a response
 * ([`Conversion`]). A new run replaces the previous result outright.
 */

use crate::clipboard::{Clipboard, SystemClipboard};
use crate::collector::{Collector, CollectorStatistics};
use crate::entry::{Entry, SelectedFile};
use crate::error::Result;
use crate::types::FileRecord;
use crate::writer::{Snippet, SnippetWriter};

/// Result of one conversion run
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Accepted files, in collection order
    pub records: Vec<FileRecord>,
    /// Rendered snippet
    pub snippet: Snippet,
    /// Collector statistics for this run
    pub statistics: CollectorStatistics,
}

impl Conversion {
    /// Collected records into a finished conversion
    pub fn from_records(
        records: Vec<FileRecord>,
        statistics: CollectorStatistics,
    ) -> Result<Self> {
        let snippet = Snippet::from_records(&records)?;
        Ok(Self {
            records,
            snippet,
            statistics,
        })
    }

    /// Sum of all record sizes in bytes
    pub fn total_size(&self) -> u64 {
        self.records.iter().map(|r| r.size).sum()
    }
}

/// Holds only the latest conversion and whether it was copied
pub struct Session {
    collector: Collector,
    latest: Option<Conversion>,
    copied: bool,
}

impl Session {
    /// Create a new session around a collector
    pub fn new(collector: Collector) -> Self {
        Self {
            collector,
            latest: None,
            copied: false,
        }
    }

    /// Convert dropped entries
    pub fn convert_entries<E: Entry>(&mut self, entries: &[E]) -> Result<&Conversion> {
        let records = self.collector.collect_entries(entries);
        self.replace(records)
    }

    /// Convert a picker selection
    pub fn convert_selection<S: SelectedFile>(&mut self, files: &[S]) -> Result<&Conversion> {
        let records = self.collector.collect_selection(files);
        self.replace(records)
    }

    fn replace(&mut self, records: Vec<FileRecord>) -> Result<&Conversion> {
        let conversion = Conversion::from_records(records, self.collector.get_statistics())?;
        log::info!(
            "Converted {} files ({} bytes)",
            conversion.records.len(),
            conversion.total_size()
        );

        self.copied = false;
        Ok(self.latest.insert(conversion))
    }

    /// Latest conversion, if any run happened
    pub fn latest(&self) -> Option<&Conversion> {
        self.latest.as_ref()
    }

    /// Whether the latest snippet was copied
    pub fn copied(&self) -> bool {
        self.copied
    }

    /// Copy the latest snippet to the system clipboard
    pub fn copy_to_clipboard(&mut self) -> bool {
        self.copy_with(&SystemClipboard)
    }

    /// Copy the latest snippet with a given clipboard
    ///
    /// Failures are logged and only show up as `false`.
    pub fn copy_with(&mut self, clipboard: &dyn Clipboard) -> bool {
        let Some(conversion) = &self.latest else {
            log::warn!("Nothing to copy yet");
            return false;
        };

        self.copied = match clipboard.copy_to_clipboard(conversion.snippet.text()) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to copy: {}", e);
                false
            }
        };
        self.copied
    }

    /// Export the latest snippet through a writer
    pub fn download(&self, writer: &SnippetWriter) -> Result<()> {
        let Some(conversion) = &self.latest else {
            crate::bail!(Config, "nothing to export, no conversion has run");
        };
        writer.write(&conversion.snippet)?;
        Ok(())
    }
}
