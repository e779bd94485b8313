use clap::Parser;
use linegrep::{search, SearchConfig, SearchResult};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Concurrent substring search across a file or the files of a directory.
///
/// Prints `[<path>]: match found at line <N>` to stdout for every matching
/// line and collects the matched lines themselves into the output file.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Input file or directory (directories are scanned non-recursively)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Literal substring to search for
    #[arg(short, long)]
    needle: Option<String>,

    /// Output file collecting all matched lines
    #[arg(short, long, default_value = "output.txt")]
    output: PathBuf,

    /// Log a warning and keep going when a file fails, instead of aborting
    #[arg(long)]
    skip_errors: bool,

    /// Path to a YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> SearchResult<()> {
    let cli = Cli::parse();

    let file_config = SearchConfig::load_from(cli.config.as_deref())?;
    let cli_config = SearchConfig {
        input_path: cli.input.unwrap_or_default(),
        needle: cli.needle.unwrap_or_default(),
        output_path: cli.output,
        continue_on_error: cli.skip_errors,
        log_level: cli.log_level.unwrap_or_else(|| "warn".to_string()),
    };
    let config = file_config.merge_with_cli(cli_config);

    init_logging(&config.log_level);

    let summary = search(&config)?;

    info!(
        "Found {} matches in {} of {} files; {} bytes written to {}",
        summary.total_matches,
        summary.files_with_matches,
        summary.files_scanned,
        summary.bytes_written,
        config.output_path.display()
    );
    Ok(())
}

/// Logs go to stderr; stdout is reserved for match lines.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
