//! GetTicketProgressHandler - read model for the progress indicator.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode, Role, TicketId};
use crate::domain::workflow::{stage_definition, Stage, WorkflowProgress};
use crate::ports::TicketRepository;

/// One stage row in the progress view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageStateView {
    pub stage: Stage,
    pub label: &'static str,
    pub owner: Role,
    pub complete: bool,
}

/// Progress snapshot for one ticket.
#[derive(Debug, Clone, Serialize)]
pub struct TicketProgressView {
    pub ticket_id: TicketId,
    pub stages: Vec<StageStateView>,
    /// Count of contiguously completed stages from the start.
    pub completed_prefix: usize,
    /// Normalized indicator position in `[0, 1]`.
    pub fraction: f64,
    pub includes_approval: bool,
    pub is_terminal: bool,
}

/// Query handler for ticket progress.
pub struct GetTicketProgressHandler {
    ticket_repository: Arc<dyn TicketRepository>,
}

impl GetTicketProgressHandler {
    pub fn new(ticket_repository: Arc<dyn TicketRepository>) -> Self {
        Self { ticket_repository }
    }

    pub async fn handle(&self, ticket_id: TicketId) -> Result<TicketProgressView, DomainError> {
        let record = self
            .ticket_repository
            .find_by_id(&ticket_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::TicketNotFound,
                    format!("Ticket not found: {}", ticket_id),
                )
            })?;

        let progress = WorkflowProgress::evaluate(&record);
        let stages = progress
            .stage_states()
            .into_iter()
            .map(|(stage, complete)| {
                let def = stage_definition(stage);
                StageStateView {
                    stage,
                    label: def.label,
                    owner: def.owner,
                    complete,
                }
            })
            .collect();

        Ok(TicketProgressView {
            ticket_id: record.id(),
            stages,
            completed_prefix: progress.completed_prefix(),
            fraction: progress.fraction(),
            includes_approval: progress.branch().includes_approval(),
            is_terminal: progress.is_terminal(),
        })
    }
}
