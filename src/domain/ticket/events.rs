//! Domain events emitted by the ticket workflow handlers.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ApprovalStatus, EquipmentCondition, EquipmentId, TicketId, Timestamp,
};

/// Events published after each successful workflow command.
///
/// Consumers (notification, audit) subscribe through the
/// `EventPublisher` port; the workflow core itself never reacts to
/// events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum TicketEvent {
    TicketCreated {
        ticket_id: TicketId,
        occurred_at: Timestamp,
    },
    VerificationRecorded {
        ticket_id: TicketId,
        occurred_at: Timestamp,
    },
    CorrectiveActionRecorded {
        ticket_id: TicketId,
        resolved_in_house: bool,
        occurred_at: Timestamp,
    },
    ApprovalDecided {
        ticket_id: TicketId,
        status: ApprovalStatus,
        occurred_at: Timestamp,
    },
    TicketClosed {
        ticket_id: TicketId,
        condition: EquipmentCondition,
        occurred_at: Timestamp,
    },
    ConditionApplied {
        ticket_id: TicketId,
        equipment_id: EquipmentId,
        condition: EquipmentCondition,
        occurred_at: Timestamp,
    },
}

impl TicketEvent {
    /// Stable event type string, used for subscription filtering.
    pub fn event_type(&self) -> &'static str {
        match self {
            TicketEvent::TicketCreated { .. } => "ticket.created",
            TicketEvent::VerificationRecorded { .. } => "ticket.verification_recorded",
            TicketEvent::CorrectiveActionRecorded { .. } => "ticket.corrective_action_recorded",
            TicketEvent::ApprovalDecided { .. } => "ticket.approval_decided",
            TicketEvent::TicketClosed { .. } => "ticket.closed",
            TicketEvent::ConditionApplied { .. } => "ticket.condition_applied",
        }
    }

    /// The ticket this event belongs to.
    pub fn ticket_id(&self) -> TicketId {
        match self {
            TicketEvent::TicketCreated { ticket_id, .. }
            | TicketEvent::VerificationRecorded { ticket_id, .. }
            | TicketEvent::CorrectiveActionRecorded { ticket_id, .. }
            | TicketEvent::ApprovalDecided { ticket_id, .. }
            | TicketEvent::TicketClosed { ticket_id, .. }
            | TicketEvent::ConditionApplied { ticket_id, .. } => *ticket_id,
        }
    }
}
