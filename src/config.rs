//! Configuration management
//!
//! Classifier parameters plus the file locations and logging level used by the
//! command-line tool, loadable from a TOML file.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// How P(measurement | class) is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmissionMode {
    /// One pre-computed likelihood row per class, looked up by measurement
    #[default]
    Table,
    /// One Gaussian per class over the pooled training measurements
    Gaussian,
    /// One Gaussian per training record, scored by the best-matching record
    RecordMax,
}

impl FromStr for EmissionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(EmissionMode::Table),
            "gaussian" => Ok(EmissionMode::Gaussian),
            "record_max" | "record-max" => Ok(EmissionMode::RecordMax),
            other => Err(format!("unknown mode '{}'", other)),
        }
    }
}

impl fmt::Display for EmissionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmissionMode::Table => write!(f, "table"),
            EmissionMode::Gaussian => write!(f, "gaussian"),
            EmissionMode::RecordMax => write!(f, "record_max"),
        }
    }
}

/// How mass carries over between consecutive time steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionModel {
    /// Compatibility recursion: `B[c][t-1]*p + B[c][t-1]*(1-p)`.
    ///
    /// Reduces to `B[c][t-1]`, so the transition probability has no effect and
    /// every class keeps a running product of its own likelihoods.
    #[default]
    SelfOnly,
    /// Opt-in left-right mixing: stay with probability `p`, move to each other
    /// class with probability `(1-p)/(K-1)`.
    Mixing,
}

impl FromStr for TransitionModel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "self_only" | "self-only" => Ok(TransitionModel::SelfOnly),
            "mixing" => Ok(TransitionModel::Mixing),
            other => Err(format!("unknown transition model '{}'", other)),
        }
    }
}

impl fmt::Display for TransitionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionModel::SelfOnly => write!(f, "self_only"),
            TransitionModel::Mixing => write!(f, "mixing"),
        }
    }
}

/// Classifier configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Global initial class weight used in table mode
    pub initial_probability: f64,
    /// Probability of staying in the same class between steps
    pub transition_probability: f64,
    pub mode: EmissionMode,
    pub transition: TransitionModel,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            initial_probability: 0.5,
            transition_probability: 0.9,
            mode: EmissionMode::Table,
            transition: TransitionModel::SelfOnly,
        }
    }
}

impl ClassifierConfig {
    /// Create a config for the given mode with default probabilities
    pub fn new(mode: EmissionMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set the global initial probability
    pub fn with_initial_probability(mut self, p: f64) -> Self {
        self.initial_probability = p;
        self
    }

    /// Set the transition probability
    pub fn with_transition_probability(mut self, p: f64) -> Self {
        self.transition_probability = p;
        self
    }

    /// Set the transition model
    pub fn with_transition(mut self, transition: TransitionModel) -> Self {
        self.transition = transition;
        self
    }

    /// Check that both probabilities lie strictly inside (0, 1)
    pub fn validate(&self) -> Result<()> {
        check_open_unit("initial_probability", self.initial_probability)?;
        check_open_unit("transition_probability", self.transition_probability)?;
        Ok(())
    }
}

fn check_open_unit(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{} must be in (0, 1), got {}",
            name, value
        )))
    }
}

/// Input file configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub likelihood: String,
    pub training: String,
    pub input: String,
    /// Labels assigned to the likelihood rows, in file order
    pub table_labels: Vec<String>,
    /// Share of training rows that are birds; the rest are planes
    pub split_ratio: f64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            likelihood: "data_files/likelihood.txt".to_string(),
            training: "data_files/training.txt".to_string(),
            input: "data_files/testing.txt".to_string(),
            table_labels: vec!["Bird".to_string(), "Plane".to_string()],
            split_ratio: 0.5,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub classifier: ClassifierConfig,
    pub data: DataConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.classifier.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
