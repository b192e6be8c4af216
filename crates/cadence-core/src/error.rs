//! Error types for descriptor building.

use cadence_config::ConfigError;
use thiserror::Error;

/// Errors raised while turning job specifications into descriptors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The job has neither a usable name nor a usable path.
    #[error("Invalid job specification: {0}")]
    InvalidSpec(String),

    /// A job in a batch failed to build.
    #[error("Job #{index} is invalid: {reason}")]
    InvalidJob { index: usize, reason: String },

    /// The job manifest could not be parsed.
    #[error("Invalid job manifest: {0}")]
    Manifest(String),

    /// Reading the manifest through the config loader failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl BuildError {
    pub fn invalid_spec(reason: impl Into<String>) -> Self {
        Self::InvalidSpec(reason.into())
    }
}
