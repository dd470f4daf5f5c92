//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

const APP_NAME: &str = "fete";
const APP_QUALIFIER: &str = "io";
const APP_ORGANIZATION: &str = "fete-tui";

/// Default API base URL of the hosted CRUD service.
pub const DEFAULT_BASE_URL: &str = "https://fsa-crud-2aa9294fe819.herokuapp.com/api";
/// Default cohort path segment.
pub const DEFAULT_COHORT: &str = "2507";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, loaded from the TOML config file and merged
/// with CLI arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Cohort path segment between the base URL and the resource.
    #[serde(default = "default_cohort")]
    pub cohort: String,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Accent color for the selected row and focus highlights.
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_cohort() -> String {
    DEFAULT_COHORT.to_string()
}

fn default_accent_color() -> String {
    "Cyan".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            cohort: default_cohort(),
            log_path: None,
            log_level: LogLevel::Info,
            accent_color: default_accent_color(),
        }
    }
}

use super::args::CliArgs;

impl AppConfig {
    /// Loads the config file at `path`, falling back to defaults when the
    /// file is absent or unreadable.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "ignoring malformed config file");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Loads from the effective config path and merges CLI arguments over
    /// the file values.
    #[must_use]
    pub fn from_args(args: CliArgs) -> Self {
        let path = args.config.clone().or_else(Self::default_config_path);
        let mut config = match path {
            Some(path) => Self::load(&path),
            None => Self::default(),
        };
        config.merge_with_args(args);
        config
    }

    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(base_url) = args.base_url {
            self.base_url = base_url;
        }
        if let Some(cohort) = args.cohort {
            self.cohort = cohort;
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(accent_color) = args.accent_color {
            self.accent_color = accent_color;
        }
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("fete.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_file() {
        let toml_content = r#"
            base_url = "http://localhost:3000/api"
            cohort = "2508"
            log_level = "debug"
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("config parses");

        assert_eq!(config.base_url, "http://localhost:3000/api");
        assert_eq!(config.cohort, "2508");
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.accent_color, "Cyan");
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.cohort, DEFAULT_COHORT);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_args_override_file_values() {
        let mut config = AppConfig::default();
        let args = CliArgs {
            config: None,
            base_url: None,
            cohort: Some("2509".to_string()),
            log_path: None,
            log_level: Some(LogLevel::Trace),
            accent_color: None,
        };

        config.merge_with_args(args);

        assert_eq!(config.cohort, "2509");
        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
