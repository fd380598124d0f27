//! `practicum.toml` configuration.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::codec::MarkPolicy;
use crate::gate::{AcceptanceGate, DEFAULT_REQUIRED_QUESTIONS};
use crate::service::grading::{DEFAULT_PASS_SCORE, GradingPolicy};

pub const DEFAULT_CONFIG_FILE: &str = "practicum.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Snapshot file for the JSON repository.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Run against the seeded in-memory data set instead of `data_file`.
    #[serde(default)]
    pub demo_mode: bool,
    /// Number of valid questions a practical's test must contain.
    #[serde(default = "default_required_questions")]
    pub required_questions: usize,
    /// Minimum score that passes a test.
    #[serde(default = "default_pass_score")]
    pub pass_score: u32,
    /// Drop question blocks with more than one correct mark.
    #[serde(default)]
    pub strict_marks: bool,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("practicum-data.json")
}
fn default_required_questions() -> usize {
    DEFAULT_REQUIRED_QUESTIONS
}
fn default_pass_score() -> u32 {
    DEFAULT_PASS_SCORE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            demo_mode: false,
            required_questions: default_required_questions(),
            pass_score: default_pass_score(),
            strict_marks: false,
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Loads `explicit` if given, else `./practicum.toml` when present,
    /// else the defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            Self::load(local)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.required_questions == 0 {
            return Err(ConfigError::Invalid(
                "required_questions must be at least 1".to_string(),
            ));
        }
        if self.pass_score as usize > self.required_questions {
            return Err(ConfigError::Invalid(format!(
                "pass_score {} is higher than required_questions {}",
                self.pass_score, self.required_questions
            )));
        }
        Ok(())
    }

    pub fn gate(&self) -> AcceptanceGate {
        AcceptanceGate::new(self.required_questions)
    }

    pub fn mark_policy(&self) -> MarkPolicy {
        if self.strict_marks {
            MarkPolicy::Strict
        } else {
            MarkPolicy::LastWins
        }
    }

    pub fn grading(&self) -> GradingPolicy {
        GradingPolicy {
            pass_score: self.pass_score,
        }
    }
}
