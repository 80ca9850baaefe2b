//! Driver configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "cmm.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Print the type-annotated program after a successful check
    #[serde(default)]
    pub show_types: bool,

    /// Maximum tracing level: error, warn, info, debug or trace
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Stop printing after this many errors (0 prints all of them)
    #[serde(default)]
    pub max_diagnostics: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_types: false,
            log_level: default_log_level(),
            max_diagnostics: 0,
        }
    }
}

impl Config {
    /// Load configuration from `config_path`, or from `cmm.toml` when none is
    /// given. A missing default file yields the defaults; a missing explicit
    /// file is an error.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path.to_owned(),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.log_level()?;
        Ok(config)
    }

    pub fn log_level(&self) -> Result<tracing::Level> {
        self.log_level
            .parse()
            .map_err(|_| anyhow::anyhow!("Unknown log level: {}", self.log_level))
    }

    /// The number of errors to print out of `total`.
    pub fn diagnostic_limit(&self, total: usize) -> usize {
        if self.max_diagnostics == 0 {
            total
        } else {
            total.min(self.max_diagnostics)
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_for_empty_file() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.log_level().unwrap(), tracing::Level::WARN);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = Config::parse("show_types = true\n").unwrap();
        assert!(config.show_types);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.max_diagnostics, 0);
    }

    #[test]
    fn test_unknown_log_level_is_rejected() {
        assert!(Config::parse("log_level = \"loud\"\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level = \"debug\"\nmax_diagnostics = 3").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.log_level().unwrap(), tracing::Level::DEBUG);
        assert_eq!(config.diagnostic_limit(10), 3);
        assert_eq!(config.diagnostic_limit(2), 2);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let error = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(error.to_string().contains("Failed to read config file"));
    }
}
