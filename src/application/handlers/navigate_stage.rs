//! NavigateStageHandler - moves a caller's cursor through the active
//! stage sequence.
//!
//! Navigation is a pure read over a freshly loaded record: the ticket
//! itself is never mutated, only the returned cursor moves.

use std::sync::Arc;

use tracing::debug;

use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode, TicketId};
use crate::domain::workflow::{Stage, StageNavigator};
use crate::ports::TicketRepository;

/// A single navigation request against a caller-held cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigateRequest {
    Advance,
    Retreat,
    JumpTo(usize),
}

/// Command to navigate within a ticket's stage sequence.
#[derive(Debug, Clone)]
pub struct NavigateStageCommand {
    pub ticket_id: TicketId,
    /// The caller's current cursor position.
    pub cursor: usize,
    pub request: NavigateRequest,
}

/// The cursor position after a successful move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigateStageResult {
    pub cursor: usize,
    pub stage: Stage,
    pub terminal: bool,
}

/// Handler for stage navigation.
pub struct NavigateStageHandler {
    ticket_repository: Arc<dyn TicketRepository>,
}

impl NavigateStageHandler {
    pub fn new(ticket_repository: Arc<dyn TicketRepository>) -> Self {
        Self { ticket_repository }
    }

    pub async fn handle(
        &self,
        cmd: NavigateStageCommand,
        metadata: CommandMetadata,
    ) -> Result<NavigateStageResult, DomainError> {
        let record = self
            .ticket_repository
            .find_by_id(&cmd.ticket_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::TicketNotFound,
                    format!("Ticket not found: {}", cmd.ticket_id),
                )
            })?;

        let mut navigator = StageNavigator::at(&record, cmd.cursor)?;
        let moved = match cmd.request {
            NavigateRequest::Advance => navigator.advance(&record),
            NavigateRequest::Retreat => navigator.retreat(),
            NavigateRequest::JumpTo(index) => navigator.jump_to(&record, index),
        };
        let stage = match moved {
            Ok(stage) => stage,
            Err(err) => {
                debug!(
                    ticket_id = %record.id(),
                    user_id = %metadata.user_id,
                    cursor = cmd.cursor,
                    request = ?cmd.request,
                    error = %err,
                    "stage navigation rejected"
                );
                return Err(err);
            }
        };

        debug!(
            ticket_id = %record.id(),
            user_id = %metadata.user_id,
            cursor = navigator.cursor(),
            stage = %stage,
            "stage navigation"
        );

        Ok(NavigateStageResult {
            cursor: navigator.cursor(),
            stage,
            terminal: navigator.is_terminal(&record),
        })
    }
}
