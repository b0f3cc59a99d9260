//! DecideApprovalHandler - the administrator's decision on an
//! externally-resolved ticket.
//!
//! Both decisions complete the stage; a rejection halts further work
//! on the ticket by policy, not by locking it here.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::domain::foundation::{
    ApprovalStatus, CommandMetadata, DomainError, ErrorCode, StateMachine, TicketId, Timestamp,
};
use crate::domain::ticket::TicketEvent;
use crate::domain::workflow::{completed_prefix, Stage, StageBranch};
use crate::ports::{EventPublisher, TicketRepository};

use super::ensure_open;

/// Command to record the administrative approval decision.
#[derive(Debug, Clone)]
pub struct DecideApprovalCommand {
    pub ticket_id: TicketId,
    /// Must be a terminal decision; `Pending` is rejected.
    pub decision: ApprovalStatus,
    pub decision_date: NaiveDate,
}

/// Handler for the approval decision.
pub struct DecideApprovalHandler {
    ticket_repository: Arc<dyn TicketRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl DecideApprovalHandler {
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
        cmd: DecideApprovalCommand,
        metadata: CommandMetadata,
    ) -> Result<(), DomainError> {
        if !cmd.decision.is_decided() {
            return Err(DomainError::validation(
                "decision",
                "Approval decision must be approved or rejected",
            ));
        }

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

        let branch = StageBranch::for_ticket(&record);
        let Some(approval_index) = branch.index_of(Stage::AdminApproval) else {
            return Err(DomainError::new(
                ErrorCode::StageNotInBranch,
                "Ticket was resolved in-house; no administrative approval applies",
            ));
        };

        if completed_prefix(&record, branch) < approval_index {
            return Err(DomainError::new(
                ErrorCode::StageLocked,
                "Approval is locked until corrective action is recorded",
            ));
        }

        record.admin_approval_status = record
            .admin_approval_status
            .transition_to(cmd.decision)?;
        record.admin_approval_date = Some(cmd.decision_date);

        self.ticket_repository.update(&record).await?;

        info!(
            ticket_id = %record.id(),
            user_id = %metadata.user_id,
            decision = %cmd.decision,
            "approval decided"
        );

        self.event_publisher
            .publish(TicketEvent::ApprovalDecided {
                ticket_id: record.id(),
                status: cmd.decision,
                occurred_at: Timestamp::now(),
            })
            .await
    }
}
