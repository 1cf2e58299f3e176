//! Configuration handling for pairsort
//!
//! Configuration is stored in `~/.config/pairsort/config.toml` (or the
//! platform equivalent), or in a file passed with `--config`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Default file the final order is written to
pub const DEFAULT_OUTPUT: &str = "sorted_output.txt";

/// Extra keys for answering in the terminal UI
///
/// The arrow keys always work; these are alternatives for one-handed use.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeyConfig {
    /// Picks the left item
    pub first: char,

    /// Picks the right item
    pub second: char,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            first: 'h',
            second: 'l',
        }
    }
}

/// Display settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show the resolved/total counter while sorting
    pub show_progress: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
        }
    }
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Where `sort` writes the result when `-o` is not given
    pub output: PathBuf,

    /// Fixed shuffle seed; random when unset
    pub seed: Option<u64>,

    /// Answer keys
    pub keys: KeyConfig,

    /// Display settings
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            seed: None,
            keys: KeyConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from an explicit file, or the global location
    ///
    /// Returns the configuration and the file it came from, if any. A
    /// missing global file yields defaults; a missing explicit file is an
    /// error.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            let config = Self::load_file(path)?;
            return Ok((config, Some(path.to_path_buf())));
        }

        let path = match Self::global_config_path() {
            Some(path) if path.is_file() => path,
            _ => return Ok((Self::default(), None)),
        };

        let config = Self::load_file(&path)?;
        Ok((config, Some(path)))
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "pairsort", "pairsort")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Loads and validates a config file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }

    /// Parses and validates TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.keys.first == self.keys.second {
            return Err(ConfigError::Invalid(format!(
                "keys.first and keys.second must differ (both are '{}')",
                self.keys.first
            )));
        }

        for key in [self.keys.first, self.keys.second] {
            if key.is_control() || key.is_whitespace() || matches!(key, 'q' | '1' | '2') {
                return Err(ConfigError::Invalid(format!(
                    "'{}' cannot be used as an answer key",
                    key.escape_default()
                )));
            }
        }

        if self.output.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("output path is empty".to_string()));
        }

        Ok(())
    }

    /// Renders the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Saves the configuration to the global location
    pub fn save_global(&self) -> Result<PathBuf> {
        let config_dir = Self::global_config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        fs::create_dir_all(&config_dir).with_context(|| {
            format!(
                "Failed to create config directory: {}",
                config_dir.display()
            )
        })?;

        let config_path = config_dir.join("config.toml");
        fs::write(&config_path, self.to_toml()?)
            .with_context(|| format!("Failed to write config: {}", config_path.display()))?;

        Ok(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.output, PathBuf::from("sorted_output.txt"));
        assert_eq!(config.seed, None);
        assert_eq!(config.keys.first, 'h');
        assert_eq!(config.keys.second, 'l');
        assert!(config.display.show_progress);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
seed = 42

[keys]
first = "a"
"#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.keys.first, 'a');
        assert_eq!(config.keys.second, 'l');
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
output = "ranked.txt"

[keys]
first = "j"
second = "k"

[display]
show_progress = false
"#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.output, PathBuf::from("ranked.txt"));
        assert_eq!(config.keys, KeyConfig { first: 'j', second: 'k' });
        assert!(!config.display.show_progress);
    }

    #[test]
    fn identical_keys_rejected() {
        let toml = r#"
[keys]
first = "x"
second = "x"
"#;

        assert!(matches!(Config::parse(toml), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn reserved_key_rejected() {
        let toml = r#"
[keys]
first = "q"
"#;

        assert!(matches!(Config::parse(toml), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        assert!(matches!(
            Config::parse("seed = \"not a number\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pairsort.toml");
        fs::write(&path, "seed = 7\n").unwrap();

        let (config, source) = Config::load(Some(&path)).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(source, Some(path));
    }

    #[test]
    fn load_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(format!("{:#}", err).contains("absent.toml"));
    }

    #[test]
    fn round_trips_through_toml() {
        let config = Config {
            seed: Some(3),
            ..Config::default()
        };

        let text = config.to_toml().unwrap();
        assert_eq!(Config::parse(&text).unwrap(), config);
    }
}
