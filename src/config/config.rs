//! Config file handling
//!
//! ```toml
//! [defaults]
//! options = ["--parse-bash-strings"]
//!
//! [exec]
//! timeout = 30
//! ```

use std::path::{Path, PathBuf};

use crate::errors::ConvertError;

/// Overrides the config directory
pub const CONFIG_DIR_ENV: &str = "CONVERT_TO_REQUESTS_CONFIG_DIR";

pub const CONFIG_FILE: &str = "config.toml";

/// convert-to-requests configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub config_dir: PathBuf,
    /// Flags prepended to the command line
    pub default_options: Vec<String>,
    /// Default `exec` timeout in seconds
    pub exec_timeout: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_dir: Self::default_config_dir(),
            default_options: Vec::new(),
            exec_timeout: None,
        }
    }
}

impl Config {
    /// Load configuration from the config file (TOML format)
    pub fn load() -> Result<Self, ConvertError> {
        Self::load_from(&Self::default_config_dir())
    }

    /// Load `config.toml` from `config_dir`; a missing file means defaults
    pub fn load_from(config_dir: &Path) -> Result<Self, ConvertError> {
        let config_file = config_dir.join(CONFIG_FILE);

        if !config_file.exists() {
            return Ok(Self {
                config_dir: config_dir.to_path_buf(),
                ..Self::default()
            });
        }

        let content = std::fs::read_to_string(&config_file)
            .map_err(|e| ConvertError::Config(format!("Failed to read {}: {}", config_file.display(), e)))?;

        let mut config = Self::parse(&content)?;
        config.config_dir = config_dir.to_path_buf();
        Ok(config)
    }

    /// Parse config file contents
    pub fn parse(content: &str) -> Result<Self, ConvertError> {
        let toml_value: toml::Value = toml::from_str(content)
            .map_err(|e| ConvertError::Config(format!("Invalid config TOML: {}", e)))?;

        let default_options = match toml_value.get("defaults").and_then(|d| d.get("options")) {
            None => Vec::new(),
            Some(value) => value
                .as_array()
                .and_then(|arr| arr.iter().map(|v| v.as_str().map(String::from)).collect())
                .ok_or_else(|| ConvertError::Config("defaults.options must be a list of strings".to_string()))?,
        };

        let exec_timeout = match toml_value.get("exec").and_then(|e| e.get("timeout")) {
            None => None,
            Some(value) => {
                let secs = value
                    .as_float()
                    .or_else(|| value.as_integer().map(|i| i as f64))
                    .filter(|s| s.is_finite() && *s > 0.0)
                    .ok_or_else(|| ConvertError::Config("exec.timeout must be a positive number".to_string()))?;
                Some(secs)
            }
        };

        Ok(Self {
            default_options,
            exec_timeout,
            ..Self::default()
        })
    }

    /// Get the default config directory
    pub fn default_config_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return PathBuf::from(dir);
        }
        dirs::config_dir()
            .map(|p| p.join("convert-to-requests"))
            .unwrap_or_else(|| PathBuf::from(".convert-to-requests"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(dir.path()).unwrap();
        assert!(config.default_options.is_empty());
        assert_eq!(config.exec_timeout, None);
        assert_eq!(config.config_dir, dir.path());
    }

    #[test]
    fn test_load_options_and_timeout() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[defaults]\noptions = [\"--parse-bash-strings\"]\n\n[exec]\ntimeout = 10\n",
        )
        .unwrap();
        let config = Config::load_from(dir.path()).unwrap();
        assert_eq!(config.default_options, vec!["--parse-bash-strings"]);
        assert_eq!(config.exec_timeout, Some(10.0));
    }

    #[test]
    fn test_float_timeout() {
        let config = Config::parse("[exec]\ntimeout = 2.5\n").unwrap();
        assert_eq!(config.exec_timeout, Some(2.5));
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(Config::parse("[defaults"), Err(ConvertError::Config(_))));
        assert!(matches!(Config::parse("[defaults]\noptions = \"--fetch\""), Err(ConvertError::Config(_))));
        assert!(matches!(Config::parse("[defaults]\noptions = [1]"), Err(ConvertError::Config(_))));
        assert!(matches!(Config::parse("[exec]\ntimeout = -1"), Err(ConvertError::Config(_))));
        assert!(matches!(Config::parse("[exec]\ntimeout = \"soon\""), Err(ConvertError::Config(_))));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config = Config::parse("[defaults]\ncolor = true\n[other]\nx = 1\n").unwrap();
        assert!(config.default_options.is_empty());
    }
}
