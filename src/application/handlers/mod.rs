//! Command and query handlers, one file per operation.
//!
//! Handlers orchestrate: load the record, apply domain logic, persist,
//! publish. They never keep state between calls; every request reloads
//! the ticket through the repository port.

mod close_ticket;
mod create_ticket;
mod decide_approval;
mod get_progress;
mod list_equipment;
mod navigate_stage;
mod record_corrective_action;
mod record_verification;

pub use close_ticket::{CloseTicketCommand, CloseTicketError, CloseTicketHandler, CloseTicketResult};
pub use create_ticket::{
    CreateTicketCommand, CreateTicketError, CreateTicketHandler, CreateTicketResult,
};
pub use decide_approval::{DecideApprovalCommand, DecideApprovalHandler};
pub use get_progress::{GetTicketProgressHandler, StageStateView, TicketProgressView};
pub use list_equipment::ListEquipmentHandler;
pub use navigate_stage::{
    NavigateRequest, NavigateStageCommand, NavigateStageHandler, NavigateStageResult,
};
pub use record_corrective_action::{RecordCorrectiveActionCommand, RecordCorrectiveActionHandler};
pub use record_verification::{RecordVerificationCommand, RecordVerificationHandler};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::ticket::TicketRecord;
use crate::domain::workflow::{is_stage_complete, Stage};

/// Rejects writes to a ticket whose closure stage is already complete.
///
/// A closed record is read-only; no field is ever mutated after the
/// terminal stage is reached.
fn ensure_open(record: &TicketRecord) -> Result<(), DomainError> {
    if is_stage_complete(record, Stage::Closure) {
        return Err(DomainError::new(
            ErrorCode::TicketClosed,
            format!("Ticket {} is closed and read-only", record.id()),
        ));
    }
    Ok(())
}
