use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::errors::{classify_io_error, SearchResult};

/// Resolves the input path to the set of files to scan.
///
/// A regular file resolves to itself. A directory resolves to its immediate
/// children, non-recursively. Entries that are not regular files (notably
/// subdirectories) are skipped with a warning rather than scanned: trying to
/// read them as files would fail for reasons unrelated to the search.
pub fn resolve_targets(input: &Path) -> SearchResult<Vec<PathBuf>> {
    let metadata = fs::metadata(input).map_err(|e| classify_io_error(input, e))?;

    if !metadata.is_dir() {
        return Ok(vec![input.to_path_buf()]);
    }

    debug!("Scanning directory: {}", input.display());

    let mut targets = Vec::new();
    for entry in fs::read_dir(input).map_err(|e| classify_io_error(input, e))? {
        let entry = entry.map_err(|e| classify_io_error(input, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| classify_io_error(&path, e))?;
        if !file_type.is_file() {
            warn!("Skipping non-file entry: {}", path.display());
            continue;
        }
        targets.push(path);
    }

    // Directory read order is platform-dependent; sort so spawn order is stable.
    targets.sort();

    debug!("Resolved {} file targets", targets.len());
    Ok(targets)
}
