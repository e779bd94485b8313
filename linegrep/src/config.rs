use config::{Config as ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{SearchError, SearchResult};

/// Configuration for a search run.
///
/// Constructed once at startup and passed by reference into [`crate::search`];
/// nothing mutates it afterwards.
///
/// # Configuration Locations
///
/// Values can be loaded from multiple locations in order of precedence:
/// 1. Custom config file specified via `--config`
/// 2. Local `.linegrep.yaml` in the current directory
/// 3. Global `$HOME/.config/linegrep/config.yaml`
///
/// CLI arguments take precedence over config file values; the merging
/// behavior is defined in [`SearchConfig::merge_with_cli`].
///
/// # Configuration Format
///
/// ```yaml
/// # File or directory to search
/// input_path: "logs"
///
/// # Literal substring to search for
/// needle: "ERROR"
///
/// # Where matched lines are collected
/// output_path: "output.txt"
///
/// # Log a warning and keep going when one file fails, instead of aborting
/// continue_on_error: false
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "warn"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// File or directory to search. Directories are scanned non-recursively.
    #[serde(default)]
    pub input_path: PathBuf,

    /// Literal substring to search for (exact, case-sensitive, byte-wise).
    #[serde(default)]
    pub needle: String,

    /// Path of the file all matched lines are collected into.
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// When true, a file that fails to open or read is logged and skipped
    /// instead of failing the whole run.
    #[serde(default)]
    pub continue_on_error: bool,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("output.txt")
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::new(),
            needle: String::new(),
            output_path: default_output_path(),
            continue_on_error: false,
            log_level: default_log_level(),
        }
    }
}

impl SearchConfig {
    /// Loads configuration from the default locations
    pub fn load() -> SearchResult<Self> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally including a specific file
    pub fn load_from(config_path: Option<&Path>) -> SearchResult<Self> {
        let mut builder = ConfigBuilder::builder();

        // Default config locations
        let config_files = [
            // Global config
            dirs::config_dir().map(|p| p.join("linegrep/config.yaml")),
            // Local config
            Some(PathBuf::from(".linegrep.yaml")),
            // Custom config
            config_path.map(PathBuf::from),
        ];

        // Add existing config files
        for path in config_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| SearchError::config_error(e.to_string()))
    }

    /// Merges CLI arguments with configuration file values
    pub fn merge_with_cli(mut self, cli_config: SearchConfig) -> Self {
        // CLI values take precedence over config file values
        if !cli_config.input_path.as_os_str().is_empty() {
            self.input_path = cli_config.input_path;
        }
        if !cli_config.needle.is_empty() {
            self.needle = cli_config.needle;
        }
        if cli_config.output_path != default_output_path() {
            self.output_path = cli_config.output_path;
        }
        if cli_config.continue_on_error {
            self.continue_on_error = true;
        }
        if cli_config.log_level != default_log_level() {
            self.log_level = cli_config.log_level;
        }
        self
    }

    /// Rejects incomplete requests before any file is opened.
    pub fn validate(&self) -> SearchResult<()> {
        if self.input_path.as_os_str().is_empty() {
            return Err(SearchError::config_error("no \"input\" path was provided"));
        }
        if self.needle.is_empty() {
            return Err(SearchError::config_error("no \"needle\" was provided"));
        }
        Ok(())
    }
}
