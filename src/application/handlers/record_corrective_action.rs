//! RecordCorrectiveActionHandler - the repair outcome, including the
//! in-house resolution flag that selects the ticket's stage branch.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode, TicketId, Timestamp};
use crate::domain::ticket::{TicketEvent, YesNo};
use crate::domain::workflow::{is_stage_complete, outstanding_fields, Stage};
use crate::ports::{EventPublisher, TicketRepository};

use super::ensure_open;

/// Command to record the corrective-action stage.
#[derive(Debug, Clone)]
pub struct RecordCorrectiveActionCommand {
    pub ticket_id: TicketId,
    pub materials_used: String,
    pub resolved_inhouse: YesNo,
    pub resolved_remark: String,
    pub consumables_needed: YesNo,
    pub consumable_details: Option<String>,
    pub external_agency_needed: YesNo,
    pub agency_name: Option<String>,
    pub approx_expenditure: Decimal,
}

/// Handler for recording corrective action.
pub struct RecordCorrectiveActionHandler {
    ticket_repository: Arc<dyn TicketRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl RecordCorrectiveActionHandler {
    pub fn new(
        ticket_repository: Arc<dyn TicketRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            ticket_repository,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: RecordCorrectiveActionCommand,
        metadata: CommandMetadata,
    ) -> Result<(), DomainError> {
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

        ensure_open(&record)?;

        if !is_stage_complete(&record, Stage::Verification) {
            return Err(DomainError::new(
                ErrorCode::StageLocked,
                "Corrective action is locked until verification is recorded",
            ));
        }

        record.materials_used = Some(cmd.materials_used);
        record.resolved_inhouse = Some(cmd.resolved_inhouse);
        record.resolved_remark = Some(cmd.resolved_remark);
        record.consumables_needed = Some(cmd.consumables_needed);
        record.consumable_details = cmd.consumable_details;
        record.external_agency_needed = Some(cmd.external_agency_needed);
        record.agency_name = cmd.agency_name;
        record.approx_expenditure = Some(cmd.approx_expenditure);
        record.normalize();

        let missing = outstanding_fields(&record, Stage::CorrectiveAction);
        if !missing.is_empty() {
            return Err(DomainError::missing_fields(
                missing.iter().map(|f| f.wire_name()),
            ));
        }

        self.ticket_repository.update(&record).await?;

        info!(
            ticket_id = %record.id(),
            user_id = %metadata.user_id,
            resolved_in_house = cmd.resolved_inhouse.is_yes(),
            "corrective action recorded"
        );

        self.event_publisher
            .publish(TicketEvent::CorrectiveActionRecorded {
                ticket_id: record.id(),
                resolved_in_house: cmd.resolved_inhouse.is_yes(),
                occurred_at: Timestamp::now(),
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryEventBus, InMemoryTicketStore};
    use crate::domain::foundation::{Role, UserId};
    use crate::domain::ticket::{ProblemCategory, TicketRecord};
    use crate::domain::workflow::StageBranch;
    use chrono::NaiveDate;

    fn metadata() -> CommandMetadata {
        CommandMetadata::new(UserId::new("mic-1").unwrap(), Role::MaintenanceInCharge)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn verified_ticket() -> TicketRecord {
        let mut r = TicketRecord::new();
        r.type_of_problem = Some(ProblemCategory::Workshop);
        r.date = Some(date("2025-03-01"));
        r.department = Some("Mechanical".to_string());
        r.location = Some("Workshop 2".to_string());
        r.complaint_details = Some("Lathe jammed".to_string());
        r.recurring_complaint = Some(YesNo::No);
        r.lab_assistant = Some("R. Iyer".to_string());
        r.lab_assistant_date = Some(date("2025-03-01"));
        r.hod = Some("Dr. Rao".to_string());
        r.hod_date = Some(date("2025-03-02"));
        r.assigned_person = Some("K. Das".to_string());
        r.in_charge_date = Some(date("2025-03-03"));
        r.verification_remarks = Some("Chuck seized".to_string());
        r
    }

    fn command(ticket_id: TicketId) -> RecordCorrectiveActionCommand {
        RecordCorrectiveActionCommand {
            ticket_id,
            materials_used: "Grease, bearings".to_string(),
            resolved_inhouse: YesNo::Yes,
            resolved_remark: "Re-greased and freed".to_string(),
            consumables_needed: YesNo::No,
            consumable_details: None,
            external_agency_needed: YesNo::No,
            agency_name: None,
            approx_expenditure: Decimal::from(450),
        }
    }

    #[tokio::test]
    async fn records_corrective_action_and_selects_branch() {
        let store = Arc::new(InMemoryTicketStore::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let ticket = verified_ticket();
        let ticket_id = ticket.id();
        store.insert(ticket);

        let handler = RecordCorrectiveActionHandler::new(store.clone(), bus.clone());
        handler.handle(command(ticket_id), metadata()).await.unwrap();

        let saved = store.get(&ticket_id).unwrap();
        assert_eq!(saved.resolved_inhouse, Some(YesNo::Yes));
        assert_eq!(StageBranch::for_ticket(&saved), StageBranch::WithoutApproval);
        assert!(bus.has_event("ticket.corrective_action_recorded"));
    }

    #[tokio::test]
    async fn external_resolution_keeps_approval_branch() {
        let store = Arc::new(InMemoryTicketStore::new());
        let ticket = verified_ticket();
        let ticket_id = ticket.id();
        store.insert(ticket);

        let handler =
            RecordCorrectiveActionHandler::new(store.clone(), Arc::new(InMemoryEventBus::new()));
        let mut cmd = command(ticket_id);
        cmd.resolved_inhouse = YesNo::No;
        handler.handle(cmd, metadata()).await.unwrap();

        let saved = store.get(&ticket_id).unwrap();
        assert_eq!(StageBranch::for_ticket(&saved), StageBranch::WithApproval);
    }

    #[tokio::test]
    async fn consumable_details_required_when_flag_is_yes() {
        let store = Arc::new(InMemoryTicketStore::new());
        let ticket = verified_ticket();
        let ticket_id = ticket.id();
        store.insert(ticket);

        let handler =
            RecordCorrectiveActionHandler::new(store, Arc::new(InMemoryEventBus::new()));
        let mut cmd = command(ticket_id);
        cmd.consumables_needed = YesNo::Yes;
        cmd.consumable_details = None;
        let err = handler.handle(cmd, metadata()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::MissingFields);
        assert!(err.message.contains("consumable_details"));
    }

    #[tokio::test]
    async fn orphaned_agency_name_is_cleared() {
        let store = Arc::new(InMemoryTicketStore::new());
        let ticket = verified_ticket();
        let ticket_id = ticket.id();
        store.insert(ticket);

        let handler =
            RecordCorrectiveActionHandler::new(store.clone(), Arc::new(InMemoryEventBus::new()));
        let mut cmd = command(ticket_id);
        cmd.external_agency_needed = YesNo::No;
        cmd.agency_name = Some("Acme Repairs".to_string());
        handler.handle(cmd, metadata()).await.unwrap();

        let saved = store.get(&ticket_id).unwrap();
        assert_eq!(saved.agency_name, None);
    }

    #[tokio::test]
    async fn rejects_before_verification() {
        let store = Arc::new(InMemoryTicketStore::new());
        let mut ticket = verified_ticket();
        ticket.verification_remarks = None;
        let ticket_id = ticket.id();
        store.insert(ticket);

        let handler =
            RecordCorrectiveActionHandler::new(store, Arc::new(InMemoryEventBus::new()));
        let err = handler.handle(command(ticket_id), metadata()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::StageLocked);
    }
}
