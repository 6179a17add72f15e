//! Error handling for the population synthesis engine.

use std::io;

/// Specialized error type for population synthesis
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    /// Missing or inconsistent configuration or epidemiology data
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A baseline risk outside the open interval (0, 1) reached the CPD synthesizer
    #[error("Numeric domain error: baseline risk {baseline} for '{condition}' is outside (0, 1)")]
    NumericDomain {
        /// Condition whose baseline was rejected
        condition: String,
        /// The offending baseline value
        baseline: f64,
    },

    /// A batch worker terminated abnormally; fatal to the whole batch
    #[error("Batch worker {worker} failed: {reason}")]
    BatchWorker {
        /// Index of the failed worker
        worker: usize,
        /// Failure description carried back to the aggregator
        reason: String,
    },

    /// Error reading a configuration or epidemiology file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error parsing a configuration or epidemiology file
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SynthesisError {
    /// Shorthand for a configuration error with a formatted message
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Missing epidemiology entry for a (band, gender, condition) triple
    pub fn missing_prevalence(band: &str, gender: &str, condition: &str) -> Self {
        Self::Configuration(format!(
            "no prevalence entry for condition '{condition}' (band {band}, gender {gender})"
        ))
    }
}

/// Result type for population synthesis operations
pub type Result<T> = std::result::Result<T, SynthesisError>;
