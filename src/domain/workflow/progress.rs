//! Progress resolver - contiguous-prefix completion over the active
//! stage sequence.
//!
//! Completion is a prefix, never a sparse set: a later stage that
//! happens to be filled (out-of-order migration, partial imports) does
//! not count while an earlier stage is still blank. Implemented as a
//! short-circuiting scan, by design.

use crate::domain::ticket::TicketRecord;

use super::completion::is_stage_complete;
use super::{Stage, StageBranch};

/// "The first N stages in the active sequence are all complete, and
/// stage N+1 is not." N may be 0.
pub fn completed_prefix(record: &TicketRecord, branch: StageBranch) -> usize {
    branch
        .stages()
        .iter()
        .take_while(|&&stage| is_stage_complete(record, stage))
        .count()
}

/// Normalized display position in `[0, 1]`.
///
/// `max(0, N-1) / (len-1)`, clamped: a prefix of 0 or 1 sits at the
/// start, a full prefix at 1.0. A sequence of length 1 (or, degenerately,
/// 0) never divides by zero and reads as fully positioned.
pub fn progress_fraction(record: &TicketRecord, branch: StageBranch) -> f64 {
    let len = branch.len();
    if len <= 1 {
        return 1.0;
    }
    let prefix = completed_prefix(record, branch);
    prefix.saturating_sub(1) as f64 / (len - 1) as f64
}

/// A read-only snapshot of workflow progress for one ticket.
///
/// Computes the branch once and exposes derived properties for display
/// and navigation gating.
#[derive(Debug, Clone)]
pub struct WorkflowProgress {
    branch: StageBranch,
    complete: Vec<bool>,
}

impl WorkflowProgress {
    /// Evaluates a record against its active stage sequence.
    pub fn evaluate(record: &TicketRecord) -> Self {
        let branch = StageBranch::for_ticket(record);
        let complete = branch
            .stages()
            .iter()
            .map(|&stage| is_stage_complete(record, stage))
            .collect();
        Self { branch, complete }
    }

    pub fn branch(&self) -> StageBranch {
        self.branch
    }

    /// Count of contiguously completed stages from the start.
    pub fn completed_prefix(&self) -> usize {
        self.complete.iter().take_while(|&&c| c).count()
    }

    /// Normalized position for the progress indicator.
    pub fn fraction(&self) -> f64 {
        let len = self.branch.len();
        if len <= 1 {
            return 1.0;
        }
        self.completed_prefix().saturating_sub(1) as f64 / (len - 1) as f64
    }

    /// Per-stage completion flags in sequence order.
    pub fn stage_states(&self) -> Vec<(Stage, bool)> {
        self.branch
            .stages()
            .iter()
            .copied()
            .zip(self.complete.iter().copied())
            .collect()
    }

    /// The first stage blocking progress, if any.
    pub fn next_incomplete(&self) -> Option<Stage> {
        self.branch.stage_at(self.completed_prefix())
    }

    /// True once every active stage is complete.
    pub fn is_terminal(&self) -> bool {
        self.completed_prefix() == self.branch.len()
    }
}
