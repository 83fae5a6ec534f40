//! CLI configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = ".scavenger";
/// Default log filter.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime configuration of the `scavenger` binary.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Where hunts, sessions and places data live
    pub data_dir: PathBuf,
    /// `tracing` filter directive
    pub log_filter: String,
    /// Environment variables that fell back to defaults
    pub defaulted: Vec<&'static str>,
}

impl CliConfig {
    /// Read `SCAVENGER_DATA_DIR` and `SCAVENGER_LOG`, falling back to defaults.
    pub fn from_env() -> Self {
        let mut defaulted = Vec::new();
        let mut load = |key: &'static str, default: &str| {
            env::var(key).unwrap_or_else(|_| {
                defaulted.push(key);
                default.to_string()
            })
        };

        let data_dir = PathBuf::from(load("SCAVENGER_DATA_DIR", DEFAULT_DATA_DIR));
        let log_filter = load("SCAVENGER_LOG", DEFAULT_LOG_FILTER);

        Self {
            data_dir,
            log_filter,
            defaulted,
        }
    }

    /// Override the data directory, e.g. from `--data-dir`.
    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        self
    }

    /// Path of the places file backing auto hints.
    pub fn places_path(&self) -> PathBuf {
        self.data_dir.join("places.json")
    }
}
