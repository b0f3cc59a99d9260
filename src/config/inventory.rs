//! Inventory synchronization configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Configuration for the closure-to-inventory condition push.
#[derive(Debug, Clone, Deserialize)]
pub struct InventoryConfig {
    /// Attempts against the inventory service before a condition push
    /// is deferred.
    #[serde(default = "default_sync_max_attempts")]
    pub sync_max_attempts: u32,
}

impl InventoryConfig {
    /// Validate inventory configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.sync_max_attempts == 0 {
            return Err(ValidationError::InvalidSyncAttempts);
        }
        if self.sync_max_attempts > 10 {
            return Err(ValidationError::SyncAttemptsTooLarge);
        }
        Ok(())
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            sync_max_attempts: default_sync_max_attempts(),
        }
    }
}

fn default_sync_max_attempts() -> u32 {
    1
}
