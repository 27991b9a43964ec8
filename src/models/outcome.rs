use crate::error::EntryError;

/// What happened to one directory entry that did not fail
///
/// Failures travel as the `Err` side of [`EntryReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The file now carries the barcode-derived name
    Renamed {
        /// Previous file name
        from: String,
        /// New file name
        to: String,
    },
    /// Directories, symlinks to directories, sockets and the like
    SkippedNotAFile,
    /// The image loader could not decode the file
    SkippedNotAnImage,
    /// The detector found nothing; the file is untouched
    SkippedNoBarcode,
}

/// Result of processing one entry
pub type EntryReport = Result<FileOutcome, EntryError>;

/// Aggregate of a completed run
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Entry name and its report, in processing order
    pub entries: Vec<(String, EntryReport)>,
}

impl RunSummary {
    /// Record the report of one entry
    pub fn record(&mut self, name: String, report: EntryReport) {
        self.entries.push((name, report));
    }

    /// Number of files renamed
    pub fn renamed(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, r)| matches!(r, Ok(FileOutcome::Renamed { .. })))
            .count()
    }

    /// Number of entries skipped for any reason
    pub fn skipped(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, r)| matches!(r, Ok(outcome) if !matches!(outcome, FileOutcome::Renamed { .. })))
            .count()
    }

    /// Number of entries that failed with an error
    pub fn failed(&self) -> usize {
        self.entries.iter().filter(|(_, r)| r.is_err()).count()
    }

    /// Total entries seen
    pub fn total(&self) -> usize {
        self.entries.len()
    }
}
