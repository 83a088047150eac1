//! Generator configuration.
//!
//! Controls how many schedules a run aims for, how hard it tries, how it
//! seeds its random source, and how history is matched.
//!
//! # Examples
//!
//! ```
//! use u_roster::config::{GeneratorConfig, HistoryMatch};
//!
//! let config = GeneratorConfig::from_toml_str(r#"
//!     target_schedules = 3
//!     max_attempts = 500
//!     random_seed = 7
//!     history_match = "first_group"
//! "#).unwrap();
//!
//! assert_eq!(config.max_attempts, 500);
//! assert_eq!(config.random_seed, Some(7));
//! assert_eq!(config.history_match, HistoryMatch::FirstGroup);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// How generated schedules are compared against history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryMatch {
    /// A candidate repeats history when its whole canonical form equals
    /// that of a history block.
    #[default]
    FullSchedule,
    /// A candidate repeats history when its canonically first group has
    /// the same members as any single history group.
    FirstGroup,
}

/// Generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct GeneratorConfig {
    /// Distinct schedules to collect before stopping.
    pub target_schedules: usize,
    /// Hard cap on placement attempts per run.
    pub max_attempts: usize,
    /// Seed for reproducible runs. `None` draws from OS entropy.
    pub random_seed: Option<u64>,
    /// Number of history blocks consulted (most recent first).
    pub history_depth: usize,
    /// History comparison mode.
    pub history_match: HistoryMatch,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            target_schedules: 3,
            max_attempts: 1000,
            random_seed: None,
            history_depth: 2,
            history_match: HistoryMatch::default(),
        }
    }
}

impl GeneratorConfig {
    /// Creates a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, is not valid TOML, or
    /// holds out-of-range values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_schedules == 0 {
            return Err(ConfigError::Invalid(
                "target_schedules must be at least 1".into(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid("max_attempts must be at least 1".into()));
        }
        Ok(())
    }

    /// Sets the schedule target.
    pub fn with_target_schedules(mut self, target: usize) -> Self {
        self.target_schedules = target;
        self
    }

    /// Sets the attempt cap.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the history depth.
    pub fn with_history_depth(mut self, depth: usize) -> Self {
        self.history_depth = depth;
        self
    }

    /// Sets the history comparison mode.
    pub fn with_history_match(mut self, mode: HistoryMatch) -> Self {
        self.history_match = mode;
        self
    }
}
