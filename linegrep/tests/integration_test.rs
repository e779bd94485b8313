use anyhow::Result;
use linegrep::{search, SearchConfig, SearchError};
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn config(input: &Path, needle: &str, output: &Path) -> SearchConfig {
    SearchConfig {
        input_path: input.to_path_buf(),
        needle: needle.to_string(),
        output_path: output.to_path_buf(),
        ..Default::default()
    }
}

fn create_file(dir: &Path, name: &str, content: &[u8]) -> Result<PathBuf> {
    let path = dir.join(name);
    File::create(&path)?.write_all(content)?;
    Ok(path)
}

#[test]
fn test_single_file_scenario() -> Result<()> {
    let dir = tempdir()?;
    let input = create_file(dir.path(), "input.txt", b"foo\nbar\nfoobar\n")?;
    let output = dir.path().join("output.txt");

    let summary = search(&config(&input, "foo", &output))?;

    assert_eq!(summary.files_scanned, 1);
    assert_eq!(summary.files_with_matches, 1);
    assert_eq!(summary.total_matches, 2);
    assert_eq!(summary.lines_written, 2);

    // One scanner is single-threaded, so in-file order is preserved.
    assert_eq!(fs::read(&output)?, b"foo\nfoobar\n");
    Ok(())
}

#[test]
fn test_directory_with_two_files() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("haystack");
    fs::create_dir(&input)?;
    create_file(&input, "a.txt", b"nothing\nalpha match here\n")?;
    create_file(&input, "b.txt", b"beta match here\nnothing\n")?;
    let output = dir.path().join("output.txt");

    let summary = search(&config(&input, "match", &output))?;

    assert_eq!(summary.files_scanned, 2);
    assert_eq!(summary.files_with_matches, 2);
    assert_eq!(summary.total_matches, 2);
    assert_eq!(summary.lines_written, 2);

    // Exactly the two matched lines, in some interleaving order, nothing else.
    let written = fs::read_to_string(&output)?;
    let mut lines: Vec<&str> = written.lines().collect();
    lines.sort_unstable();
    assert_eq!(lines, vec!["alpha match here", "beta match here"]);
    Ok(())
}

#[test]
fn test_output_length_is_sum_of_matched_lines() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("haystack");
    fs::create_dir(&input)?;

    let mut expected_bytes = 0u64;
    for i in 0..8 {
        let mut content = Vec::new();
        for j in 0..50 {
            let line = format!("file {} line {} needle maybe\n", i, j);
            expected_bytes += line.len() as u64;
            content.extend_from_slice(line.as_bytes());
            content.extend_from_slice(b"filler line with nothing of note\n");
        }
        create_file(&input, &format!("file_{}.txt", i), &content)?;
    }
    let output = dir.path().join("output.txt");

    let summary = search(&config(&input, "needle", &output))?;

    assert_eq!(summary.total_matches, 8 * 50);
    assert_eq!(summary.bytes_written, expected_bytes);
    assert_eq!(fs::metadata(&output)?.len(), expected_bytes);
    Ok(())
}

#[test]
fn test_within_file_order_is_preserved() -> Result<()> {
    let dir = tempdir()?;
    let mut content = Vec::new();
    for i in 0..200 {
        content.extend_from_slice(format!("needle {}\n", i).as_bytes());
    }
    let input = create_file(dir.path(), "ordered.txt", &content)?;
    let output = dir.path().join("output.txt");

    search(&config(&input, "needle", &output))?;

    assert_eq!(fs::read(&output)?, content);
    Ok(())
}

#[test]
fn test_empty_directory_creates_empty_output() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("empty");
    fs::create_dir(&input)?;
    let output = dir.path().join("output.txt");

    let summary = search(&config(&input, "anything", &output))?;

    assert_eq!(summary.files_scanned, 0);
    assert_eq!(summary.total_matches, 0);
    assert_eq!(summary.lines_written, 0);
    assert!(output.exists());
    assert_eq!(fs::metadata(&output)?.len(), 0);
    Ok(())
}

#[test]
fn test_empty_needle_rejected_before_any_io() -> Result<()> {
    let dir = tempdir()?;
    let input = create_file(dir.path(), "input.txt", b"content\n")?;
    let output = dir.path().join("output.txt");

    let err = search(&config(&input, "", &output)).unwrap_err();
    assert!(matches!(err, SearchError::ConfigError(_)));

    // Rejected before the output file was created.
    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_empty_input_path_rejected() -> Result<()> {
    let dir = tempdir()?;
    let output = dir.path().join("output.txt");

    let err = search(&config(Path::new(""), "needle", &output)).unwrap_err();
    assert!(matches!(err, SearchError::ConfigError(_)));
    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_missing_input_fails_without_creating_output() -> Result<()> {
    let dir = tempdir()?;
    let output = dir.path().join("output.txt");

    let err = search(&config(
        &dir.path().join("does-not-exist"),
        "needle",
        &output,
    ))
    .unwrap_err();
    assert!(matches!(err, SearchError::FileNotFound(_)));
    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_final_line_without_newline_is_matched() -> Result<()> {
    let dir = tempdir()?;
    let input = create_file(dir.path(), "input.txt", b"first\nlast needle")?;
    let output = dir.path().join("output.txt");

    let summary = search(&config(&input, "needle", &output))?;

    assert_eq!(summary.total_matches, 1);
    assert_eq!(fs::read(&output)?, b"last needle");
    Ok(())
}

#[test]
fn test_subdirectories_are_skipped_not_fatal() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("haystack");
    fs::create_dir(&input)?;
    fs::create_dir(input.join("nested"))?;
    create_file(&input.join("nested"), "hidden.txt", b"needle unseen\n")?;
    create_file(&input, "seen.txt", b"needle seen\n")?;
    let output = dir.path().join("output.txt");

    let summary = search(&config(&input, "needle", &output))?;

    // Non-recursive: only the immediate regular file is scanned.
    assert_eq!(summary.files_scanned, 1);
    assert_eq!(summary.total_matches, 1);
    assert_eq!(fs::read(&output)?, b"needle seen\n");
    Ok(())
}

#[test]
fn test_output_file_is_truncated_between_runs() -> Result<()> {
    let dir = tempdir()?;
    let input = create_file(dir.path(), "input.txt", b"one needle\n")?;
    let output = dir.path().join("output.txt");
    fs::write(&output, b"stale bytes from an earlier, longer run\n")?;

    search(&config(&input, "needle", &output))?;

    assert_eq!(fs::read(&output)?, b"one needle\n");
    Ok(())
}

#[test]
fn test_many_files_fan_out() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("haystack");
    fs::create_dir(&input)?;
    for i in 0..50 {
        create_file(
            &input,
            &format!("file_{:02}.txt", i),
            format!("filler\nneedle in file {}\n", i).as_bytes(),
        )?;
    }
    let output = dir.path().join("output.txt");

    let summary = search(&config(&input, "needle", &output))?;

    assert_eq!(summary.files_scanned, 50);
    assert_eq!(summary.files_with_matches, 50);
    assert_eq!(summary.total_matches, 50);

    let written = fs::read_to_string(&output)?;
    assert_eq!(written.lines().count(), 50);
    // Every written line is byte-identical to a source line.
    for line in written.lines() {
        assert!(line.starts_with("needle in file "));
    }
    Ok(())
}

#[cfg(unix)]
mod unix {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Makes `path` unreadable, or returns false in privileged environments
    /// where file modes are not enforced.
    fn make_unreadable(path: &Path) -> Result<bool> {
        fs::set_permissions(path, fs::Permissions::from_mode(0o000))?;
        Ok(File::open(path).is_err())
    }

    #[test]
    fn test_unreadable_file_fails_fast_by_default() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("haystack");
        fs::create_dir(&input)?;
        create_file(&input, "good.txt", b"needle here\n")?;
        let bad = create_file(&input, "locked.txt", b"needle there\n")?;
        if !make_unreadable(&bad)? {
            return Ok(());
        }
        let output = dir.path().join("output.txt");

        let err = search(&config(&input, "needle", &output)).unwrap_err();
        assert!(matches!(err, SearchError::PermissionDenied(_)));
        Ok(())
    }

    #[test]
    fn test_unreadable_file_skipped_with_continue_on_error() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("haystack");
        fs::create_dir(&input)?;
        create_file(&input, "good.txt", b"needle here\n")?;
        let bad = create_file(&input, "locked.txt", b"needle there\n")?;
        if !make_unreadable(&bad)? {
            return Ok(());
        }
        let output = dir.path().join("output.txt");

        let mut cfg = config(&input, "needle", &output);
        cfg.continue_on_error = true;
        let summary = search(&cfg)?;

        assert_eq!(summary.files_scanned, 1);
        assert_eq!(summary.files_failed, 1);
        assert_eq!(summary.total_matches, 1);
        assert_eq!(fs::read(&output)?, b"needle here\n");
        Ok(())
    }
}
