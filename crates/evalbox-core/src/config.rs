//! Configuration management for evalbox.
//!
//! Loads configuration from ${EVALBOX_HOME}/config.toml with sensible defaults.

use std::{env, fs};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::fsutil::write_atomic;

/// Default config template with comments, embedded at compile time.
const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("default_config.toml");

/// Environment variable that overrides `base_url`.
pub const BASE_URL_ENV: &str = "EVALBOX_BASE_URL";

pub mod paths {
    //! Path resolution for evalbox configuration and data directories.
    //!
    //! `EVALBOX_HOME` resolution order:
    //! 1. `EVALBOX_HOME` environment variable (if set)
    //! 2. ~/.config/evalbox (default)

    use std::env;
    use std::path::PathBuf;

    /// Returns the evalbox home directory.
    ///
    /// Checks `EVALBOX_HOME` first, falls back to ~/.config/evalbox, and to
    /// a relative `.evalbox` directory when no home directory is known.
    pub fn evalbox_home() -> PathBuf {
        if let Ok(home) = env::var("EVALBOX_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".evalbox"),
            |h| h.join(".config").join("evalbox"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        evalbox_home().join("config.toml")
    }

    /// Returns the path to the persisted UI state file.
    pub fn state_path() -> PathBuf {
        evalbox_home().join("state.json")
    }

    /// Returns the directory that holds log files.
    pub fn logs_dir() -> PathBuf {
        evalbox_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the evaluation server.
    pub base_url: String,

    /// Path of the evaluation endpoint, relative to `base_url`.
    pub eval_path: String,

    /// Substring that marks a response as a successful evaluation.
    pub success_marker: String,

    /// Message shown when the evaluation request fails.
    pub error_message: String,

    /// Seconds before a notification hides itself (0 keeps it until dismissed).
    pub notification_timeout_secs: u64,

    /// Height of the command editor, in rows.
    pub editor_rows: u16,
}

impl Config {
    const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/";
    const DEFAULT_EVAL_PATH: &str = "/eval";
    const DEFAULT_SUCCESS_MARKER: &str = "Heslo";
    const DEFAULT_ERROR_MESSAGE: &str = "Při vyhodnocování došlo k chybě. Zkuste to později a případně kontaktujte některého z organizátorů";
    const DEFAULT_NOTIFICATION_TIMEOUT_SECS: u64 = 6;
    const DEFAULT_EDITOR_ROWS: u16 = 8;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Returns the base URL to use, preferring `EVALBOX_BASE_URL` when set.
    /// Empty strings are treated as unset.
    pub fn effective_base_url(&self) -> String {
        env::var(BASE_URL_ENV)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.base_url.trim().to_string())
    }

    pub fn notification_timeout(&self) -> Option<Duration> {
        if self.notification_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.notification_timeout_secs))
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        write_atomic(path, DEFAULT_CONFIG_TEMPLATE)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            eval_path: Self::DEFAULT_EVAL_PATH.to_string(),
            success_marker: Self::DEFAULT_SUCCESS_MARKER.to_string(),
            error_message: Self::DEFAULT_ERROR_MESSAGE.to_string(),
            notification_timeout_secs: Self::DEFAULT_NOTIFICATION_TIMEOUT_SECS,
            editor_rows: Self::DEFAULT_EDITOR_ROWS,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs};

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.eval_path, "/eval");
        assert_eq!(config.success_marker, "Heslo");
        assert_eq!(config.notification_timeout_secs, 6);
    }

    #[test]
    fn test_partial_config_merges_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "base_url = \"http://eval.local/\"\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.base_url, "http://eval.local/");
        assert_eq!(config.editor_rows, 8);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "base_url = [").unwrap();

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn test_default_template_parses_to_defaults() {
        let config: Config = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        let defaults = Config::default();
        assert_eq!(config.base_url, defaults.base_url);
        assert_eq!(config.error_message, defaults.error_message);
    }

    #[test]
    fn test_init_creates_file_and_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nested").join("config.toml");

        Config::init(&config_path).unwrap();
        assert!(config_path.exists());

        let err = Config::init(&config_path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_zero_timeout_disables_auto_hide() {
        let config = Config {
            notification_timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.notification_timeout(), None);
        assert_eq!(
            Config::default().notification_timeout(),
            Some(Duration::from_secs(6))
        );
    }
}
