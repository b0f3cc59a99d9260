//! Completion evaluator - whether one stage is individually satisfied.
//!
//! Pure functions of the record and the stage definition table. Never
//! errors: missing or malformed data simply reads as "not complete".

use crate::domain::ticket::{TicketField, TicketRecord};

use super::definition::stage_definition;
use super::Stage;

/// Returns true iff every required field of the stage is present.
///
/// Administrative approval deviates from the generic rule: a populated
/// `admin_approval_status` of "pending" does NOT complete the stage;
/// only the approved/rejected decisions do. The record normalizes
/// inconsistent history before evaluation.
pub fn is_stage_complete(record: &TicketRecord, stage: Stage) -> bool {
    let record = record.normalized();
    if stage == Stage::AdminApproval {
        return record.admin_approval_status.is_decided();
    }
    stage_definition(stage)
        .required
        .iter()
        .all(|&field| record.satisfies(field))
}

/// The required fields of a stage that are still missing, in table
/// order. Used to tell callers exactly what blocks a stage-advancing
/// action.
pub fn outstanding_fields(record: &TicketRecord, stage: Stage) -> Vec<TicketField> {
    let record = record.normalized();
    stage_definition(stage)
        .required
        .iter()
        .copied()
        .filter(|&field| !record.satisfies(field))
        .collect()
}
