//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("inventory.sync_max_attempts must be at least 1")]
    InvalidSyncAttempts,

    #[error("inventory.sync_max_attempts exceeds maximum allowed (10)")]
    SyncAttemptsTooLarge,
}
