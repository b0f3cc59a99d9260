//! In-memory inventory service.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EquipmentCondition, EquipmentId, ErrorCode};
use crate::ports::InventoryService;

/// Map-backed `InventoryService` with a failure knob for exercising the
/// deferral path of the closure synchronizer.
#[derive(Default)]
pub struct InMemoryInventory {
    conditions: Mutex<HashMap<EquipmentId, EquipmentCondition>>,
    fail_next: AtomicU32,
    applies: AtomicU32,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `n` apply calls fail with `InventoryError`.
    pub fn fail_next(&self, n: u32) {
        self.fail_next.store(n, Ordering::SeqCst);
    }

    /// The condition last applied for an equipment item, if any.
    pub fn condition_of(&self, id: &EquipmentId) -> Option<EquipmentCondition> {
        self.conditions.lock().unwrap().get(id).copied()
    }

    /// Number of successful apply calls.
    pub fn apply_count(&self) -> u32 {
        self.applies.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InventoryService for InMemoryInventory {
    async fn apply_condition(
        &self,
        equipment_id: &EquipmentId,
        condition: EquipmentCondition,
    ) -> Result<(), DomainError> {
        if self.fail_next.load(Ordering::SeqCst) > 0 {
            self.fail_next.fetch_sub(1, Ordering::SeqCst);
            return Err(DomainError::new(
                ErrorCode::InventoryError,
                "inventory unavailable",
            ));
        }
        self.conditions
            .lock()
            .unwrap()
            .insert(*equipment_id, condition);
        self.applies.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
