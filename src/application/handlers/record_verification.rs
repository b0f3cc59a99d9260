//! RecordVerificationHandler - the maintenance in-charge's initial
//! assessment of a submitted ticket.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode, TicketId, Timestamp};
use crate::domain::ticket::TicketEvent;
use crate::domain::workflow::{is_stage_complete, outstanding_fields, Stage};
use crate::ports::{EventPublisher, TicketRepository};

use super::ensure_open;

/// Command to record the verification stage.
#[derive(Debug, Clone)]
pub struct RecordVerificationCommand {
    pub ticket_id: TicketId,
    pub assigned_person: String,
    pub in_charge_date: NaiveDate,
    pub verification_remarks: String,
}

/// Handler for recording verification.
pub struct RecordVerificationHandler {
    ticket_repository: Arc<dyn TicketRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl RecordVerificationHandler {
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
        cmd: RecordVerificationCommand,
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

        // Verification opens once the ticket has been submitted.
        if !is_stage_complete(&record, Stage::Submission) {
            return Err(DomainError::new(
                ErrorCode::StageLocked,
                "Verification is locked until the ticket is submitted",
            ));
        }

        record.assigned_person = Some(cmd.assigned_person);
        record.in_charge_date = Some(cmd.in_charge_date);
        record.verification_remarks = Some(cmd.verification_remarks);
        record.normalize();

        let missing = outstanding_fields(&record, Stage::Verification);
        if !missing.is_empty() {
            return Err(DomainError::missing_fields(
                missing.iter().map(|f| f.wire_name()),
            ));
        }

        self.ticket_repository.update(&record).await?;

        info!(
            ticket_id = %record.id(),
            user_id = %metadata.user_id,
            "verification recorded"
        );

        self.event_publisher
            .publish(TicketEvent::VerificationRecorded {
                ticket_id: record.id(),
                occurred_at: Timestamp::now(),
            })
            .await
    }
}
