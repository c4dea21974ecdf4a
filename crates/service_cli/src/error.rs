//! Error types for the volcloud CLI.

use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Shape parameters rejected by the core
    #[error("Invalid shape parameters: {0}")]
    Shape(#[from] cloud_core::ConfigError),

    /// Sampler finished in an inconsistent state
    #[error("Sampling error: {0}")]
    Sampling(#[from] cloud_core::SamplingError),

    /// Output could not be written
    #[error("Output error: {0}")]
    Output(#[from] cloud_io::IoError),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
