//! Closure synchronizer - propagates the final equipment condition to
//! the inventory collaborator when a ticket closes.
//!
//! Invoked exactly once, on the transition into closure completeness
//! (the close handler guards re-entry). An inventory failure never
//! fails the ticket's own completion; the update is deferred instead.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::{EquipmentCondition, EquipmentId};
use crate::domain::ticket::TicketRecord;
use crate::ports::InventoryService;

/// Result of one synchronization attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The inventory now reflects the final condition.
    Applied {
        equipment_id: EquipmentId,
        condition: EquipmentCondition,
    },
    /// Ticket carries no equipment reference; nothing to update.
    Skipped,
    /// Inventory unreachable after all attempts; retry out-of-band.
    Deferred { attempts: u32 },
}

/// Synchronizes a closed ticket's equipment condition to the inventory.
pub struct ClosureSynchronizer {
    inventory: Arc<dyn InventoryService>,
    max_attempts: u32,
}

impl ClosureSynchronizer {
    pub fn new(inventory: Arc<dyn InventoryService>) -> Self {
        Self {
            inventory,
            max_attempts: 1,
        }
    }

    /// Builder: number of inventory attempts before deferring (min 1).
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Pushes the final condition to the inventory.
    ///
    /// Never returns an error: a ticket without an equipment reference
    /// is skipped, and a failing collaborator defers the update.
    pub async fn sync(&self, record: &TicketRecord) -> SyncOutcome {
        let Some(equipment_id) = record.equipment_id else {
            info!(ticket_id = %record.id(), "closure sync skipped: no equipment reference");
            return SyncOutcome::Skipped;
        };
        let Some(condition) = record.final_condition() else {
            // Closure validation guarantees a final condition; tolerate
            // its absence rather than crash on an odd record.
            warn!(ticket_id = %record.id(), "closure sync skipped: no final condition");
            return SyncOutcome::Skipped;
        };

        for attempt in 1..=self.max_attempts {
            match self.inventory.apply_condition(&equipment_id, condition).await {
                Ok(()) => {
                    info!(
                        ticket_id = %record.id(),
                        equipment_id = %equipment_id,
                        condition = %condition,
                        "equipment condition synchronized"
                    );
                    return SyncOutcome::Applied {
                        equipment_id,
                        condition,
                    };
                }
                Err(err) => {
                    warn!(
                        ticket_id = %record.id(),
                        equipment_id = %equipment_id,
                        attempt,
                        error = %err,
                        "inventory sync attempt failed"
                    );
                }
            }
        }

        warn!(
            ticket_id = %record.id(),
            equipment_id = %equipment_id,
            attempts = self.max_attempts,
            "inventory sync deferred"
        );
        SyncOutcome::Deferred {
            attempts: self.max_attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use crate::domain::foundation::{DomainError, ErrorCode};

    struct RecordingInventory {
        applied: Mutex<Vec<(EquipmentId, EquipmentCondition)>>,
        fail_first: AtomicU32,
    }

    impl RecordingInventory {
        fn new() -> Self {
            Self {
                applied: Mutex::new(Vec::new()),
                fail_first: AtomicU32::new(0),
            }
        }

        fn failing_first(n: u32) -> Self {
            let inv = Self::new();
            inv.fail_first.store(n, Ordering::SeqCst);
            inv
        }

        fn applied(&self) -> Vec<(EquipmentId, EquipmentCondition)> {
            self.applied.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl InventoryService for RecordingInventory {
        async fn apply_condition(
            &self,
            equipment_id: &EquipmentId,
            condition: EquipmentCondition,
        ) -> Result<(), DomainError> {
            if self.fail_first.load(Ordering::SeqCst) > 0 {
                self.fail_first.fetch_sub(1, Ordering::SeqCst);
                return Err(DomainError::new(
                    ErrorCode::InventoryError,
                    "inventory unavailable",
                ));
            }
            self.applied.lock().unwrap().push((*equipment_id, condition));
            Ok(())
        }
    }

    fn closed_ticket(equipment: Option<EquipmentId>) -> TicketRecord {
        let mut record = TicketRecord::new();
        record.equipment_id = equipment;
        record.equipment_status = Some(EquipmentCondition::Damaged);
        record
    }

    #[tokio::test]
    async fn applies_condition_to_referenced_equipment() {
        let inventory = Arc::new(RecordingInventory::new());
        let synchronizer = ClosureSynchronizer::new(inventory.clone());

        let equipment_id = EquipmentId::new();
        let record = closed_ticket(Some(equipment_id));
        let outcome = synchronizer.sync(&record).await;

        assert_eq!(
            outcome,
            SyncOutcome::Applied {
                equipment_id,
                condition: EquipmentCondition::Damaged,
            }
        );
        assert_eq!(
            inventory.applied(),
            vec![(equipment_id, EquipmentCondition::Damaged)]
        );
    }

    #[tokio::test]
    async fn skips_ticket_without_equipment_reference() {
        let inventory = Arc::new(RecordingInventory::new());
        let synchronizer = ClosureSynchronizer::new(inventory.clone());

        let outcome = synchronizer.sync(&closed_ticket(None)).await;

        assert_eq!(outcome, SyncOutcome::Skipped);
        assert!(inventory.applied().is_empty());
    }

    #[tokio::test]
    async fn defers_after_exhausting_attempts() {
        let inventory = Arc::new(RecordingInventory::failing_first(5));
        let synchronizer = ClosureSynchronizer::new(inventory.clone()).with_max_attempts(2);

        let outcome = synchronizer.sync(&closed_ticket(Some(EquipmentId::new()))).await;

        assert_eq!(outcome, SyncOutcome::Deferred { attempts: 2 });
        assert!(inventory.applied().is_empty());
    }

    #[tokio::test]
    async fn retries_within_configured_attempts() {
        let inventory = Arc::new(RecordingInventory::failing_first(1));
        let synchronizer = ClosureSynchronizer::new(inventory.clone()).with_max_attempts(3);

        let equipment_id = EquipmentId::new();
        let outcome = synchronizer.sync(&closed_ticket(Some(equipment_id))).await;

        assert!(matches!(outcome, SyncOutcome::Applied { .. }));
        assert_eq!(inventory.applied().len(), 1);
    }

    #[tokio::test]
    async fn skips_when_condition_is_not_final() {
        let inventory = Arc::new(RecordingInventory::new());
        let synchronizer = ClosureSynchronizer::new(inventory.clone());

        let mut record = closed_ticket(Some(EquipmentId::new()));
        record.equipment_status = Some(EquipmentCondition::UnderMaintenance);

        assert_eq!(synchronizer.sync(&record).await, SyncOutcome::Skipped);
        assert!(inventory.applied().is_empty());
    }
}
