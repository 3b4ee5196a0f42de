//! Solver configuration.
//!
//! Values come from built-in defaults or an optional YAML file. The
//! command-line flags applied in `main` take precedence over both.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Largest register the CLI lets the local simulator allocate (512 MiB of amplitudes).
pub const MAX_QUBIT_LIMIT: u32 = 25;

/// Settings for one `qroute solve` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Measurement shots taken by the decoder.
    #[serde(default = "default_shots")]
    pub shots: u32,

    /// Sampling seed; entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Qubit limit of the local simulator.
    #[serde(default = "default_max_qubits")]
    pub max_qubits: u32,

    /// Log level used when no `-v` flag is given.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_shots() -> u32 {
    qroute_vrp::DEFAULT_SHOTS
}

fn default_max_qubits() -> u32 {
    20
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            shots: default_shots(),
            seed: None,
            max_qubits: default_max_qubits(),
            log_level: default_log_level(),
        }
    }
}

impl SolverConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::IoError(format!("{}: {}", path.as_ref().display(), e))
        })?;

        let config: SolverConfig = serde_yaml_ng::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load the file if one is given, otherwise the defaults.
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        match config_file {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shots == 0 {
            return Err(ConfigError::ValidationError(
                "shots must be greater than 0".to_string(),
            ));
        }

        if self.max_qubits == 0 || self.max_qubits > MAX_QUBIT_LIMIT {
            return Err(ConfigError::ValidationError(format!(
                "max_qubits must be between 1 and {MAX_QUBIT_LIMIT}, got {}",
                self.max_qubits
            )));
        }

        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid log level: {} (must be one of {})",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
