//! Feed configuration.
//!
//! Loaded from `muse-feed.toml` next to where the command runs (or an
//! explicit `--config` path). All options are optional — the file can be
//! absent entirely, and a sparse file overrides just the values it names:
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! data_dir = ".muse-feed"        # Where the feed storage lives
//! simulated_latency_ms = 2000    # Cosmetic generation delay (0 disables)
//! # corpus_file = "prompts.txt"  # Override the built-in prompt corpus
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Crate configuration with sensible defaults throughout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeedConfig {
    /// Directory holding the durable feed storage.
    pub data_dir: String,
    /// Simulated generation latency in milliseconds. Cosmetic only.
    pub simulated_latency_ms: u64,
    /// Optional path to a prompt corpus file (one prompt per line).
    pub corpus_file: Option<String>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            data_dir: ".muse-feed".to_string(),
            simulated_latency_ms: 2000,
            corpus_file: None,
        }
    }
}

impl FeedConfig {
    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.trim().is_empty() {
            return Err(ConfigError::Validation("data_dir must not be empty".into()));
        }
        // A minute of fake latency is a frozen terminal, not a simulation.
        if self.simulated_latency_ms > 60_000 {
            return Err(ConfigError::Validation(
                "simulated_latency_ms must be <= 60000".into(),
            ));
        }
        Ok(())
    }
}

/// Stock config with every option documented, printed by `gen-config`.
pub fn stock_config_toml() -> String {
    let defaults = FeedConfig::default();
    format!(
        r#"# muse-feed configuration
# All options are optional - defaults shown below.

# Where the durable feed storage lives.
data_dir = "{}"

# Cosmetic generation delay in milliseconds (0 disables the wait).
simulated_latency_ms = {}

# Override the built-in prompt corpus with a text file,
# one prompt per line ('#' lines and blanks are skipped).
# corpus_file = "prompts.txt"
"#,
        defaults.data_dir, defaults.simulated_latency_ms
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn absent_file_loads_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = FeedConfig::load(&tmp.path().join("muse-feed.toml")).unwrap();
        assert_eq!(config.data_dir, ".muse-feed");
        assert_eq!(config.simulated_latency_ms, 2000);
        assert_eq!(config.corpus_file, None);
    }

    #[test]
    fn sparse_file_overrides_only_named_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("muse-feed.toml");
        fs::write(&path, "simulated_latency_ms = 0\n").unwrap();

        let config = FeedConfig::load(&path).unwrap();
        assert_eq!(config.simulated_latency_ms, 0);
        assert_eq!(config.data_dir, ".muse-feed");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("muse-feed.toml");
        fs::write(&path, "data_dri = \"typo\"\n").unwrap();
        assert!(matches!(FeedConfig::load(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn blank_data_dir_fails_validation() {
        let config = FeedConfig {
            data_dir: "  ".into(),
            ..FeedConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn excessive_latency_fails_validation() {
        let config = FeedConfig {
            simulated_latency_ms: 120_000,
            ..FeedConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn stock_config_parses_back_to_defaults() {
        let config: FeedConfig = toml::from_str(&stock_config_toml()).unwrap();
        assert_eq!(config.data_dir, FeedConfig::default().data_dir);
        assert_eq!(
            config.simulated_latency_ms,
            FeedConfig::default().simulated_latency_ms
        );
    }
}
