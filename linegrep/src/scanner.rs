use crossbeam_channel::Sender;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use tracing::{debug, trace};

use crate::errors::{classify_io_error, SearchError, SearchResult};
use crate::results::{MatchLine, ScanReport};

const BUFFER_CAPACITY: usize = 65536;

/// Scans one file line-by-line for a literal needle.
///
/// One scanner runs per file target, concurrently with all the others and
/// with the collector. Matched lines are handed to the collector over the
/// shared rendezvous channel; a progress line is printed to stdout for each
/// match. Logging goes to stderr via `tracing`, so stdout carries nothing
/// but match lines.
#[derive(Debug)]
pub struct LineScanner {
    path: PathBuf,
    needle: String,
}

/// Byte-wise substring containment. Exact and case-sensitive; no decoding
/// happens, so lines that are not valid UTF-8 are still searched.
fn contains_needle(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() {
        return true;
    }
    if haystack.len() < needle.len() {
        return false;
    }
    haystack.windows(needle.len()).any(|window| window == needle)
}

impl LineScanner {
    /// Creates a scanner for one file target
    pub fn new(path: PathBuf, needle: String) -> Self {
        Self { path, needle }
    }

    /// Scans the file, sending every matching line to `results`.
    ///
    /// Lines are read with a newline-delimited read so the trailing newline
    /// stays part of the line; a final line without one is still read and
    /// evaluated. Line numbers are 1-indexed. Reaching end-of-input is
    /// normal completion; any other read error fails the scan.
    ///
    /// Each send blocks until the collector takes the line. A send on a
    /// disconnected channel means the collector already failed, and reports
    /// [`SearchError::ChannelClosed`] so the collector's own error can take
    /// precedence.
    pub fn scan(&self, results: &Sender<MatchLine>) -> SearchResult<ScanReport> {
        trace!("Scanning file: {}", self.path.display());

        let file = File::open(&self.path).map_err(|e| classify_io_error(&self.path, e))?;
        let mut reader = BufReader::with_capacity(BUFFER_CAPACITY, file);
        let needle = self.needle.as_bytes();

        let mut line = Vec::new();
        let mut lines_scanned = 0usize;
        let mut matches_found = 0usize;

        loop {
            line.clear();
            let read = reader
                .read_until(b'\n', &mut line)
                .map_err(|e| classify_io_error(&self.path, e))?;
            if read == 0 {
                break;
            }
            lines_scanned += 1;

            if contains_needle(&line, needle) {
                matches_found += 1;
                println!(
                    "[{}]: match found at line {}",
                    self.path.display(),
                    lines_scanned
                );
                results
                    .send(MatchLine {
                        path: self.path.clone(),
                        line_number: lines_scanned,
                        content: line.clone(),
                    })
                    .map_err(|_| SearchError::ChannelClosed)?;
            }
        }

        debug!(
            "Scanned {} lines in {}, {} matched",
            lines_scanned,
            self.path.display(),
            matches_found
        );

        Ok(ScanReport {
            path: self.path.clone(),
            lines_scanned,
            matches_found,
        })
    }
}
