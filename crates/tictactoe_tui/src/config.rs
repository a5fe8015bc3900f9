//! Settings for the terminal UI.
//!
//! Loaded from an optional TOML file; command-line flags win over file values.

use crate::cli::PlayArgs;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tictactoe_history::SortOrder;
use tracing::{debug, info, instrument};

/// Settings file used when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "tictactoe.toml";

/// Terminal UI settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Where the UI writes its log (stdout belongs to the terminal).
    log_file: PathBuf,

    /// Initial order of the history panel.
    sort_order: SortOrder,

    /// Whether the history panel starts visible.
    show_history: bool,

    /// Below this many columns the history panel stacks under the board.
    compact_width: u16,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("tictactoe_tui.log"),
            sort_order: SortOrder::Ascending,
            show_history: true,
            compact_width: 80,
        }
    }
}

impl TuiConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(?config, "Config loaded successfully");
        Ok(config)
    }

    /// Resolves the settings for a `play` invocation.
    ///
    /// An explicit `--config` must exist; the default path is optional.
    #[instrument(skip(args))]
    pub fn for_play(args: &PlayArgs) -> Result<Self, ConfigError> {
        let config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)?
            }
            None => {
                debug!("No config file, using defaults");
                Self::default()
            }
        };
        Ok(config.with_overrides(args))
    }

    /// Applies command-line flags on top of file values.
    pub fn with_overrides(mut self, args: &PlayArgs) -> Self {
        if let Some(log_file) = &args.log_file {
            self.log_file = log_file.clone();
        }
        if args.descending {
            self.sort_order = SortOrder::Descending;
        }
        if args.hide_history {
            self.show_history = false;
        }
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sort_order = \"descending\"\ncompact_width = 60").unwrap();

        let config = TuiConfig::from_file(file.path()).unwrap();
        assert_eq!(*config.sort_order(), SortOrder::Descending);
        assert_eq!(*config.compact_width(), 60);
        assert!(*config.show_history());
        assert_eq!(config.log_file(), &PathBuf::from("tictactoe_tui.log"));
    }

    #[test]
    fn test_bad_file_reports_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sort_order = \"sideways\"").unwrap();

        let err = TuiConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let args = PlayArgs {
            config: Some(PathBuf::from("/nonexistent/tictactoe.toml")),
            ..PlayArgs::default()
        };
        assert!(TuiConfig::for_play(&args).is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let args = PlayArgs {
            log_file: Some(PathBuf::from("other.log")),
            descending: true,
            hide_history: true,
            ..PlayArgs::default()
        };
        let config = TuiConfig::default().with_overrides(&args);
        assert_eq!(*config.sort_order(), SortOrder::Descending);
        assert!(!*config.show_history());
        assert_eq!(config.log_file(), &PathBuf::from("other.log"));
    }
}
