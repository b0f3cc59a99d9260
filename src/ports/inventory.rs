//! Inventory service port - write side of the equipment store.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EquipmentCondition, EquipmentId};

/// Write port used by the closure synchronizer.
///
/// `apply_condition` must be idempotent on the collaborator side:
/// applying the same condition to the same equipment twice is a no-op.
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Record the condition of an equipment item.
    ///
    /// # Errors
    ///
    /// - `EquipmentNotFound` if the id is unknown
    /// - `InventoryError` on collaborator failure (retryable)
    async fn apply_condition(
        &self,
        equipment_id: &EquipmentId,
        condition: EquipmentCondition,
    ) -> Result<(), DomainError>;
}
