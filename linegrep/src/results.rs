use std::path::PathBuf;

/// A single matched line in flight from a scanner to the collector.
///
/// `content` holds the raw bytes of the line, including its trailing newline
/// when the source line had one, so the collector can reproduce it verbatim.
#[derive(Debug, Clone)]
pub struct MatchLine {
    /// The file the line came from
    pub path: PathBuf,
    /// The 1-indexed line number within that file
    pub line_number: usize,
    /// The full raw line
    pub content: Vec<u8>,
}

/// What one scanner found in one file
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// The file that was scanned
    pub path: PathBuf,
    /// Total lines read from the file
    pub lines_scanned: usize,
    /// Lines containing the needle
    pub matches_found: usize,
}

/// The collector's completion acknowledgment
#[derive(Debug, Clone, Default)]
pub struct WriteReport {
    /// Matched lines written to the output file
    pub lines_written: usize,
    /// Total bytes written to the output file
    pub bytes_written: u64,
}

/// Aggregate outcome of a whole search run
#[derive(Debug, Clone, Default)]
pub struct SearchSummary {
    /// Number of files scanned to completion
    pub files_scanned: usize,
    /// Number of scanned files with at least one match
    pub files_with_matches: usize,
    /// Number of files skipped after a per-file error (lenient mode only)
    pub files_failed: usize,
    /// Total matches across all files
    pub total_matches: usize,
    /// Matched lines written to the output file
    pub lines_written: usize,
    /// Total bytes written to the output file
    pub bytes_written: u64,
}

impl SearchSummary {
    /// Creates a new empty summary
    pub fn new() -> Self {
        Default::default()
    }

    /// Folds one scanner's report into the summary
    pub fn add_scan(&mut self, report: &ScanReport) {
        self.files_scanned += 1;
        if report.matches_found > 0 {
            self.files_with_matches += 1;
            self.total_matches += report.matches_found;
        }
    }

    /// Records a file that was skipped after a per-file error
    pub fn add_failure(&mut self) {
        self.files_failed += 1;
    }

    /// Records the collector's acknowledgment
    pub fn set_write_report(&mut self, report: &WriteReport) {
        self.lines_written = report.lines_written;
        self.bytes_written = report.bytes_written;
    }
}
