//! Branch selector - which stage sequence applies to a ticket.
//!
//! The administrative approval stage only exists for tickets that were
//! NOT resolved in-house. The two valid sequences are modeled as a
//! tagged variant; callers compute the branch once per evaluation and
//! pass it explicitly into all index-based stage arithmetic, because
//! the valid index range itself differs between branches.

use once_cell::sync::Lazy;

use crate::domain::ticket::{TicketRecord, YesNo};

use super::definition::STAGE_TABLE;
use super::Stage;

// Both sequences are derived from the definition table so stage order
// is declared exactly once.
static WITH_APPROVAL: Lazy<Vec<Stage>> =
    Lazy::new(|| STAGE_TABLE.iter().map(|d| d.stage).collect());

static WITHOUT_APPROVAL: Lazy<Vec<Stage>> = Lazy::new(|| {
    STAGE_TABLE
        .iter()
        .map(|d| d.stage)
        .filter(|&s| s != Stage::AdminApproval)
        .collect()
});

/// One of the two valid stage sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageBranch {
    /// Full six-stage sequence, administrative approval included.
    WithApproval,
    /// Five-stage sequence for tickets resolved in-house.
    WithoutApproval,
}

impl StageBranch {
    /// Selects the branch for a ticket.
    ///
    /// Approval is elided only when in-house resolution is positively
    /// recorded. While `resolved_inhouse` is still unset the full
    /// sequence applies: excluding the stage prematurely would hide a
    /// stage the ticket may yet reach.
    pub fn for_ticket(record: &TicketRecord) -> Self {
        if record.resolved_in_house() == Some(YesNo::Yes) {
            StageBranch::WithoutApproval
        } else {
            StageBranch::WithApproval
        }
    }

    /// The active stages, in order.
    pub fn stages(&self) -> &'static [Stage] {
        match self {
            StageBranch::WithApproval => &WITH_APPROVAL,
            StageBranch::WithoutApproval => &WITHOUT_APPROVAL,
        }
    }

    /// Number of active stages (6 or 5).
    pub fn len(&self) -> usize {
        self.stages().len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Position of a stage within this branch, if it participates.
    pub fn index_of(&self, stage: Stage) -> Option<usize> {
        self.stages().iter().position(|&s| s == stage)
    }

    /// The stage at a cursor position.
    pub fn stage_at(&self, index: usize) -> Option<Stage> {
        self.stages().get(index).copied()
    }

    /// True when the approval stage is part of this sequence.
    pub fn includes_approval(&self) -> bool {
        matches!(self, StageBranch::WithApproval)
    }
}
