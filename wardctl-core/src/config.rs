use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, WardError};

/// Environment variable overriding `[database] path`.
pub const DB_ENV: &str = "WARDCTL_DB";
/// Environment variable overriding `[logging] file`.
pub const LOG_FILE_ENV: &str = "WARDCTL_LOG_FILE";

/// Configuration for wardctl, read from ~/.wardctl/config.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WardConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub foreign_keys: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: WardConfig::home().join("hospital.db"),
            foreign_keys: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: PathBuf,
    pub console_level: String,
    pub file_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: WardConfig::home().join("hospital_management.log"),
            console_level: "warn".to_string(),
            file_level: "debug".to_string(),
        }
    }
}

impl WardConfig {
    /// Load from the default location, falling back to defaults when the
    /// file does not exist. Environment overrides are applied last.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| WardError::config(path, format!("failed to read: {e}")))?;
            Self::from_toml(path, &content)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.expand_paths();
        Ok(config)
    }

    fn from_toml(path: &Path, content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| WardError::config(path, e.to_string()))
    }

    /// ~/.wardctl
    pub fn home() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".wardctl")
    }

    /// Get config file path: ~/.wardctl/config.toml
    pub fn config_path() -> PathBuf {
        Self::home().join("config.toml")
    }

    fn apply_env_overrides(&mut self) {
        if let Some(db) = env::var_os(DB_ENV).filter(|v| !v.is_empty()) {
            self.database.path = PathBuf::from(db);
        }
        if let Some(log) = env::var_os(LOG_FILE_ENV).filter(|v| !v.is_empty()) {
            self.logging.file = PathBuf::from(log);
        }
    }

    /// Expand a leading `~` and `${HOME}` in configured paths
    fn expand_paths(&mut self) {
        self.database.path = expand_home(&self.database.path);
        self.logging.file = expand_home(&self.logging.file);
    }

    /// Render as TOML (used by `wardctl config show` / `config init`)
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| WardError::config(Self::config_path(), e.to_string()))
    }
}

fn expand_home(path: &Path) -> PathBuf {
    let Some(home) = dirs::home_dir() else {
        return path.to_path_buf();
    };

    let raw = path.display().to_string();
    let raw = raw.replace("${HOME}", &home.display().to_string());
    match raw.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None if raw == "~" => home,
        None => PathBuf::from(raw),
    }
}
