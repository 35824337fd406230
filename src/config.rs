//! Runtime configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `VITALRISK_MODEL_PATH` | `models/model.json` |
//! | `VITALRISK_PREPROCESS_PATH` | `models/preprocess.json` |
//! | `VITALRISK_LOG_MODE` | `auto` (`file`, `stdout`) |
//! | `VITALRISK_LOG_FILE` | `vitalrisk.log` |
//!
//! Log verbosity follows `RUST_LOG` through `tracing_subscriber::EnvFilter`.

use std::path::PathBuf;

pub const MODEL_PATH_ENV: &str = "VITALRISK_MODEL_PATH";
pub const PREPROCESS_PATH_ENV: &str = "VITALRISK_PREPROCESS_PATH";
pub const LOG_MODE_ENV: &str = "VITALRISK_LOG_MODE";
pub const LOG_FILE_ENV: &str = "VITALRISK_LOG_FILE";

const DEFAULT_MODEL_PATH: &str = "models/model.json";
const DEFAULT_PREPROCESS_PATH: &str = "models/preprocess.json";
const DEFAULT_LOG_FILE: &str = "vitalrisk.log";

/// Where log output goes.
///
/// Writing logs to the terminal would corrupt the TUI, so `Auto` picks the
/// file when stdout is interactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Resolve `Auto` against whether stdout is a terminal.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Classifier artifact
    pub model_path: PathBuf,
    /// Preprocessing transform artifact
    pub preprocess_path: PathBuf,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            preprocess_path: PathBuf::from(DEFAULT_PREPROCESS_PATH),
            log_mode: LogMode::Auto,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup function.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            model_path: get(MODEL_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            preprocess_path: get(PREPROCESS_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.preprocess_path),
            log_mode: get(LOG_MODE_ENV)
                .map(|v| LogMode::parse(&v))
                .unwrap_or(defaults.log_mode),
            log_file: get(LOG_FILE_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
        }
    }
}
