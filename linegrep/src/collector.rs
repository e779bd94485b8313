use crossbeam_channel::Receiver;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::errors::{SearchError, SearchResult};
use crate::results::{MatchLine, WriteReport};

/// Receives matched lines from all scanners and appends them to the output
/// file. A single collector runs per search, so output writes are serialized
/// by construction.
#[derive(Debug)]
pub struct MatchCollector {
    writer: BufWriter<File>,
    output_path: PathBuf,
}

impl MatchCollector {
    /// Opens (creates or truncates) the output file.
    ///
    /// The open happens on the caller's thread, before any receive loop
    /// exists, so a failed open can never leave a collector waiting on the
    /// channel against an unopened output resource.
    pub fn create(output_path: &Path) -> SearchResult<Self> {
        let file = File::create(output_path)
            .map_err(|e| SearchError::output_error(output_path, e))?;
        debug!("Opened output file: {}", output_path.display());
        Ok(Self {
            writer: BufWriter::new(file),
            output_path: output_path.to_path_buf(),
        })
    }

    /// Receives until every sender is gone, writing each line verbatim.
    ///
    /// The channel disconnects only after the dispatcher has joined all
    /// scanners and dropped its own sender, so the loop sees every match
    /// before it ends. The returned report is the completion acknowledgment
    /// the dispatcher waits for.
    pub fn run(mut self, results: Receiver<MatchLine>) -> SearchResult<WriteReport> {
        let mut report = WriteReport::default();

        for m in results {
            trace!(
                "Writing match from {} line {}",
                m.path.display(),
                m.line_number
            );
            self.writer
                .write_all(&m.content)
                .map_err(|e| SearchError::output_error(&self.output_path, e))?;
            report.lines_written += 1;
            report.bytes_written += m.content.len() as u64;
        }

        self.writer
            .flush()
            .map_err(|e| SearchError::output_error(&self.output_path, e))?;

        debug!(
            "Collector finished: {} lines, {} bytes written to {}",
            report.lines_written,
            report.bytes_written,
            self.output_path.display()
        );
        Ok(report)
    }
}
