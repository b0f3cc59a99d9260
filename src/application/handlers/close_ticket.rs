//! CloseTicketHandler - final sign-off and inventory synchronization.
//!
//! Closing is the only write that crosses from the ticket store into
//! the inventory. The ticket is persisted as closed first; the
//! condition push happens after and is allowed to defer, so a flaky
//! inventory can never hold a finished ticket open.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::domain::foundation::{
    CommandMetadata, DomainError, EquipmentCondition, ErrorCode, TicketId, Timestamp,
};
use crate::domain::ticket::TicketEvent;
use crate::domain::workflow::{
    completed_prefix, is_stage_complete, outstanding_fields, ClosureSynchronizer, Stage,
    StageBranch, SyncOutcome,
};
use crate::ports::{EventPublisher, InventoryService, TicketRepository};

/// Command to close a ticket.
#[derive(Debug, Clone)]
pub struct CloseTicketCommand {
    pub ticket_id: TicketId,
    pub completion_remark_lab: String,
    pub lab_completion_name: String,
    pub lab_completion_date: NaiveDate,
    pub completion_remark_maintenance: String,
    pub maintenance_closed_date: NaiveDate,
    /// Must be a final condition; `UnderMaintenance` cannot close.
    pub condition: EquipmentCondition,
}

/// Result of closing: whether the inventory took the condition.
#[derive(Debug)]
pub struct CloseTicketResult {
    pub outcome: SyncOutcome,
}

/// Error type for ticket closure.
#[derive(Debug, Clone)]
pub enum CloseTicketError {
    /// The ticket is already closed; closing is not idempotent.
    AlreadyClosed(TicketId),
    /// The chosen condition is not a valid terminal state.
    NotFinal(EquipmentCondition),
    /// Validation or collaborator error.
    Domain(DomainError),
}

impl std::fmt::Display for CloseTicketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CloseTicketError::AlreadyClosed(id) => {
                write!(f, "Ticket already closed: {}", id)
            }
            CloseTicketError::NotFinal(condition) => {
                write!(f, "Condition {} cannot close a ticket", condition)
            }
            CloseTicketError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CloseTicketError {}

impl From<DomainError> for CloseTicketError {
    fn from(err: DomainError) -> Self {
        CloseTicketError::Domain(err)
    }
}

/// Handler for closing a ticket.
pub struct CloseTicketHandler {
    ticket_repository: Arc<dyn TicketRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    synchronizer: ClosureSynchronizer,
}

impl CloseTicketHandler {
    pub fn new(
        ticket_repository: Arc<dyn TicketRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        inventory: Arc<dyn InventoryService>,
    ) -> Self {
        Self {
            ticket_repository,
            event_publisher,
            synchronizer: ClosureSynchronizer::new(inventory),
        }
    }

    /// Builder: inventory attempts before the condition push defers.
    pub fn with_sync_attempts(mut self, attempts: u32) -> Self {
        self.synchronizer = self.synchronizer.with_max_attempts(attempts);
        self
    }

    pub async fn handle(
        &self,
        cmd: CloseTicketCommand,
        metadata: CommandMetadata,
    ) -> Result<CloseTicketResult, CloseTicketError> {
        let mut record = self
            .ticket_repository
            .find_by_id(&cmd.ticket_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::TicketNotFound,
                    format!("Ticket not found: {}", cmd.ticket_id),
                )
            })?;

        // Re-closing would re-fire the inventory push; the sync must
        // run at most once per ticket.
        if is_stage_complete(&record, Stage::Closure) {
            return Err(CloseTicketError::AlreadyClosed(record.id()));
        }

        if !cmd.condition.is_final() {
            return Err(CloseTicketError::NotFinal(cmd.condition));
        }

        let branch = StageBranch::for_ticket(&record);
        let closure_index = branch
            .index_of(Stage::Closure)
            .unwrap_or(branch.len() - 1);
        if completed_prefix(&record, branch) < closure_index {
            return Err(DomainError::new(
                ErrorCode::StageLocked,
                "Closure is locked until all earlier stages are complete",
            )
            .into());
        }

        record.completion_remark_lab = Some(cmd.completion_remark_lab);
        record.lab_completion_name = Some(cmd.lab_completion_name);
        record.lab_completion_date = Some(cmd.lab_completion_date);
        record.completion_remark_maintenance = Some(cmd.completion_remark_maintenance);
        record.maintenance_closed_date = Some(cmd.maintenance_closed_date);
        record.equipment_status = Some(cmd.condition);
        record.normalize();

        let missing = outstanding_fields(&record, Stage::Closure);
        if !missing.is_empty() {
            return Err(DomainError::missing_fields(
                missing.iter().map(|f| f.wire_name()),
            )
            .into());
        }

        self.ticket_repository.update(&record).await?;

        info!(
            ticket_id = %record.id(),
            user_id = %metadata.user_id,
            condition = %cmd.condition,
            "ticket closed"
        );

        self.event_publisher
            .publish(TicketEvent::TicketClosed {
                ticket_id: record.id(),
                condition: cmd.condition,
                occurred_at: Timestamp::now(),
            })
            .await?;

        let outcome = self.synchronizer.sync(&record).await;
        if let SyncOutcome::Applied {
            equipment_id,
            condition,
        } = outcome
        {
            self.event_publisher
                .publish(TicketEvent::ConditionApplied {
                    ticket_id: record.id(),
                    equipment_id,
                    condition,
                    occurred_at: Timestamp::now(),
                })
                .await?;
        }

        Ok(CloseTicketResult { outcome })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryEventBus, InMemoryInventory, InMemoryTicketStore};
    use crate::domain::foundation::{ApprovalStatus, EquipmentId, Role, UserId};
    use crate::domain::ticket::{ProblemCategory, TicketRecord, YesNo};
    use rust_decimal::Decimal;

    fn metadata() -> CommandMetadata {
        CommandMetadata::new(UserId::new("lab-1").unwrap(), Role::LabAssistant)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /// In-house ticket with every stage before Closure complete.
    fn closable_ticket(equipment: Option<EquipmentId>) -> TicketRecord {
        let mut r = TicketRecord::new();
        r.type_of_problem = Some(ProblemCategory::Electrical);
        r.date = Some(date("2025-03-01"));
        r.equipment_id = equipment;
        r.department = Some("Physics".to_string());
        r.location = Some("Block B".to_string());
        r.complaint_details = Some("Bench supply dead".to_string());
        r.recurring_complaint = Some(YesNo::No);
        r.lab_assistant = Some("R. Iyer".to_string());
        r.lab_assistant_date = Some(date("2025-03-01"));
        r.hod = Some("Dr. Rao".to_string());
        r.hod_date = Some(date("2025-03-02"));
        r.assigned_person = Some("K. Das".to_string());
        r.in_charge_date = Some(date("2025-03-03"));
        r.verification_remarks = Some("Blown fuse".to_string());
        r.materials_used = Some("Fuse".to_string());
        r.resolved_inhouse = Some(YesNo::Yes);
        r.resolved_remark = Some("Replaced fuse".to_string());
        r.consumables_needed = Some(YesNo::No);
        r.external_agency_needed = Some(YesNo::No);
        r.approx_expenditure = Some(Decimal::from(50));
        r
    }

    fn command(ticket_id: TicketId) -> CloseTicketCommand {
        CloseTicketCommand {
            ticket_id,
            completion_remark_lab: "Working".to_string(),
            lab_completion_name: "R. Iyer".to_string(),
            lab_completion_date: date("2025-03-10"),
            completion_remark_maintenance: "Verified".to_string(),
            maintenance_closed_date: date("2025-03-10"),
            condition: EquipmentCondition::Active,
        }
    }

    fn handler(
        store: Arc<InMemoryTicketStore>,
        bus: Arc<InMemoryEventBus>,
        inventory: Arc<InMemoryInventory>,
    ) -> CloseTicketHandler {
        CloseTicketHandler::new(store, bus, inventory)
    }

    #[tokio::test]
    async fn closes_and_pushes_condition_to_inventory() {
        let store = Arc::new(InMemoryTicketStore::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let inventory = Arc::new(InMemoryInventory::new());

        let equipment_id = EquipmentId::new();
        let ticket = closable_ticket(Some(equipment_id));
        let ticket_id = ticket.id();
        store.insert(ticket);

        let handler = handler(store.clone(), bus.clone(), inventory.clone());
        let result = handler.handle(command(ticket_id), metadata()).await.unwrap();

        assert!(matches!(result.outcome, SyncOutcome::Applied { .. }));
        assert_eq!(
            inventory.condition_of(&equipment_id),
            Some(EquipmentCondition::Active)
        );
        assert!(bus.has_event("ticket.closed"));
        assert!(bus.has_event("ticket.condition_applied"));

        let saved = store.get(&ticket_id).unwrap();
        assert!(is_stage_complete(&saved, Stage::Closure));
    }

    #[tokio::test]
    async fn closes_without_equipment_reference() {
        let store = Arc::new(InMemoryTicketStore::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let ticket = closable_ticket(None);
        let ticket_id = ticket.id();
        store.insert(ticket);

        let handler = handler(store, bus.clone(), Arc::new(InMemoryInventory::new()));
        let result = handler.handle(command(ticket_id), metadata()).await.unwrap();

        assert_eq!(result.outcome, SyncOutcome::Skipped);
        assert!(bus.has_event("ticket.closed"));
        assert!(!bus.has_event("ticket.condition_applied"));
    }

    #[tokio::test]
    async fn closing_twice_is_refused() {
        let store = Arc::new(InMemoryTicketStore::new());
        let inventory = Arc::new(InMemoryInventory::new());
        let equipment_id = EquipmentId::new();
        let ticket = closable_ticket(Some(equipment_id));
        let ticket_id = ticket.id();
        store.insert(ticket);

        let handler = handler(store, Arc::new(InMemoryEventBus::new()), inventory.clone());
        handler.handle(command(ticket_id), metadata()).await.unwrap();
        let err = handler.handle(command(ticket_id), metadata()).await.unwrap_err();

        assert!(matches!(err, CloseTicketError::AlreadyClosed(_)));
        // The inventory saw exactly one push.
        assert_eq!(inventory.apply_count(), 1);
    }

    #[tokio::test]
    async fn under_maintenance_cannot_close() {
        let store = Arc::new(InMemoryTicketStore::new());
        let ticket = closable_ticket(None);
        let ticket_id = ticket.id();
        store.insert(ticket);

        let handler = handler(
            store,
            Arc::new(InMemoryEventBus::new()),
            Arc::new(InMemoryInventory::new()),
        );
        let mut cmd = command(ticket_id);
        cmd.condition = EquipmentCondition::UnderMaintenance;
        let err = handler.handle(cmd, metadata()).await.unwrap_err();

        assert!(matches!(err, CloseTicketError::NotFinal(_)));
    }

    #[tokio::test]
    async fn rejects_when_earlier_stage_incomplete() {
        let store = Arc::new(InMemoryTicketStore::new());
        let mut ticket = closable_ticket(None);
        ticket.resolved_inhouse = Some(YesNo::No);
        // Approval branch, still pending: Closure is locked.
        ticket.admin_approval_status = ApprovalStatus::Pending;
        let ticket_id = ticket.id();
        store.insert(ticket);

        let handler = handler(
            store,
            Arc::new(InMemoryEventBus::new()),
            Arc::new(InMemoryInventory::new()),
        );
        let err = handler.handle(command(ticket_id), metadata()).await.unwrap_err();

        match err {
            CloseTicketError::Domain(err) => assert_eq!(err.code, ErrorCode::StageLocked),
            other => panic!("expected Domain error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn inventory_failure_defers_but_ticket_stays_closed() {
        let store = Arc::new(InMemoryTicketStore::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let inventory = Arc::new(InMemoryInventory::new());
        inventory.fail_next(10);

        let ticket = closable_ticket(Some(EquipmentId::new()));
        let ticket_id = ticket.id();
        store.insert(ticket);

        let handler =
            handler(store.clone(), bus.clone(), inventory).with_sync_attempts(2);
        let result = handler.handle(command(ticket_id), metadata()).await.unwrap();

        assert_eq!(result.outcome, SyncOutcome::Deferred { attempts: 2 });
        assert!(!bus.has_event("ticket.condition_applied"));
        let saved = store.get(&ticket_id).unwrap();
        assert!(is_stage_complete(&saved, Stage::Closure));
    }
}
