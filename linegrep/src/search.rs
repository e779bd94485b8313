use crossbeam_channel::bounded;
use std::thread;
use tracing::{debug, info, warn};

use crate::collector::MatchCollector;
use crate::config::SearchConfig;
use crate::errors::{SearchError, SearchResult};
use crate::results::{MatchLine, SearchSummary};
use crate::scanner::LineScanner;
use crate::targets::resolve_targets;

/// Runs a complete search: fan out one scanner per file target, fan in
/// through a single collector, and return the aggregate summary.
///
/// Shutdown is a strict three-phase protocol. The dispatcher first joins
/// every scanner (the join barrier), only then drops its channel sender to
/// disconnect the collector's receive loop, and finally joins the collector
/// to take its write report as the completion acknowledgment. Closing the
/// channel earlier could truncate the output; returning before the
/// acknowledgment could leave it unflushed.
///
/// The default error policy is fail-fast: the first scanner error fails the
/// run. All threads are still joined and the output file closed before the
/// error is returned, so no worker is ever abandoned mid-write. With
/// `continue_on_error` set, per-file errors are logged and counted instead.
pub fn search(config: &SearchConfig) -> SearchResult<SearchSummary> {
    config.validate()?;

    info!(
        "Starting search for {:?} in {}",
        config.needle,
        config.input_path.display()
    );

    let targets = resolve_targets(&config.input_path)?;

    // The output file is opened here, before any scanner or the collector
    // thread exists. An open failure aborts the run with no threads to
    // unwind, and the collector can never receive against an unopened file.
    let collector = MatchCollector::create(&config.output_path)?;

    let (sender, receiver) = bounded::<MatchLine>(0);

    let collector_handle = thread::spawn(move || collector.run(receiver));

    let mut scanner_handles = Vec::with_capacity(targets.len());
    for path in targets {
        let scanner = LineScanner::new(path, config.needle.clone());
        let results = sender.clone();
        scanner_handles.push(thread::spawn(move || scanner.scan(&results)));
    }
    debug!("Spawned {} scanners", scanner_handles.len());

    // Phase 1: join barrier over all scanners.
    let mut summary = SearchSummary::new();
    let mut scanner_error: Option<SearchError> = None;
    for handle in scanner_handles {
        match handle.join() {
            Ok(Ok(report)) => summary.add_scan(&report),
            Ok(Err(e)) if config.continue_on_error => {
                warn!("Skipping file after error: {}", e);
                summary.add_failure();
            }
            Ok(Err(e)) => {
                if scanner_error.is_none() {
                    scanner_error = Some(e);
                } else {
                    debug!("Additional scanner error: {}", e);
                }
            }
            Err(_) => {
                if scanner_error.is_none() {
                    scanner_error = Some(SearchError::thread_panic("scanner thread panicked"));
                }
            }
        }
    }

    // Phase 2: every scanner has finished; disconnecting the channel now
    // cannot drop an in-flight match.
    drop(sender);

    // Phase 3: the collector's report is its completion acknowledgment.
    let write_report = collector_handle
        .join()
        .map_err(|_| SearchError::thread_panic("collector thread panicked"))?;

    // A collector failure is the root cause of any ChannelClosed errors the
    // scanners saw, so it takes precedence over them.
    let write_report = write_report?;

    if let Some(e) = scanner_error {
        return Err(e);
    }

    summary.set_write_report(&write_report);
    info!(
        "Search complete: {} matches in {} of {} files, {} bytes written",
        summary.total_matches, summary.files_with_matches, summary.files_scanned, summary.bytes_written
    );
    Ok(summary)
}
