//! Navigation controller - a cursor state machine over the active
//! stage sequence.
//!
//! Forward movement is gated by the completed prefix: a caller may only
//! enter a stage that prefix completion has unlocked. Viewing earlier
//! stages is never destructive, so retreating is always allowed. All
//! rejections leave the cursor unchanged.

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::ticket::TicketRecord;

use super::completion::is_stage_complete;
use super::progress::completed_prefix;
use super::{Stage, StageBranch};

/// Cursor over `StageBranch::stages()` for one ticket.
///
/// The navigator snapshots the branch at construction; callers build a
/// fresh navigator from a reloaded record per request, matching the
/// no-caching contract of the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageNavigator {
    branch: StageBranch,
    cursor: usize,
}

impl StageNavigator {
    /// Opens a navigator positioned at the first incomplete stage
    /// (or the last stage when everything is complete).
    pub fn new(record: &TicketRecord) -> Self {
        let branch = StageBranch::for_ticket(record);
        let cursor = completed_prefix(record, branch).min(branch.len() - 1);
        Self { branch, cursor }
    }

    /// Restores a navigator at a caller-held cursor position.
    pub fn at(record: &TicketRecord, cursor: usize) -> Result<Self, DomainError> {
        let branch = StageBranch::for_ticket(record);
        if cursor >= branch.len() {
            return Err(stage_locked(cursor, branch.len() - 1));
        }
        Ok(Self { branch, cursor })
    }

    pub fn branch(&self) -> StageBranch {
        self.branch
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The stage the cursor addresses.
    pub fn current_stage(&self) -> Stage {
        self.branch
            .stage_at(self.cursor)
            .expect("cursor is kept within branch bounds")
    }

    /// Highest index a forward move may target right now.
    ///
    /// Normally the completed prefix. Special case: once Submission is
    /// complete, Verification (index 2) is unlocked regardless, because
    /// its fields are populated by another role than the submitter.
    fn unlocked_through(&self, record: &TicketRecord) -> usize {
        let prefix = completed_prefix(record, self.branch);
        let submit_unlock = if is_stage_complete(record, Stage::Submission) {
            2
        } else {
            0
        };
        prefix.max(submit_unlock).min(self.branch.len() - 1)
    }

    /// Moves one stage forward.
    ///
    /// Rejected past the unlocked prefix, past the last stage, or once
    /// the workflow is terminal; the cursor is unchanged on rejection.
    pub fn advance(&mut self, record: &TicketRecord) -> Result<Stage, DomainError> {
        if self.is_terminal(record) {
            return Err(DomainError::new(
                ErrorCode::TicketClosed,
                "Ticket is closed; no further stage transitions",
            ));
        }
        let target = self.cursor + 1;
        let unlocked = self.unlocked_through(record);
        if target >= self.branch.len() || target > unlocked {
            return Err(stage_locked(target, unlocked));
        }
        self.cursor = target;
        Ok(self.current_stage())
    }

    /// Moves one stage back. Legal whenever not already at the first
    /// stage.
    pub fn retreat(&mut self) -> Result<Stage, DomainError> {
        if self.cursor == 0 {
            return Err(stage_locked(0, 0).with_detail("reason", "already at first stage"));
        }
        self.cursor -= 1;
        Ok(self.current_stage())
    }

    /// Jumps directly to a stage index.
    ///
    /// Legal iff `index <= max(completed_prefix, 1)`: skip-ahead into
    /// unreached stages is blocked, while the first two stages can
    /// always be revisited.
    pub fn jump_to(&mut self, record: &TicketRecord, index: usize) -> Result<Stage, DomainError> {
        let reachable = completed_prefix(record, self.branch)
            .max(1)
            .min(self.branch.len() - 1);
        if index > reachable {
            return Err(stage_locked(index, reachable));
        }
        self.cursor = index;
        Ok(self.current_stage())
    }

    /// Terminal once the cursor addresses a complete Closure stage.
    pub fn is_terminal(&self, record: &TicketRecord) -> bool {
        self.current_stage() == Stage::Closure && is_stage_complete(record, Stage::Closure)
    }
}

fn stage_locked(requested: usize, unlocked_through: usize) -> DomainError {
    DomainError::new(
        ErrorCode::StageLocked,
        format!(
            "Stage index {} is locked; indexes 0..={} are currently open",
            requested, unlocked_through
        ),
    )
    .with_detail("requested", requested.to_string())
    .with_detail("unlocked_through", unlocked_through.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::EquipmentCondition;
    use crate::domain::ticket::{ProblemCategory, YesNo};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn fill_origination(r: &mut TicketRecord) {
        r.type_of_problem = Some(ProblemCategory::System);
        r.date = Some(date("2025-03-01"));
    }

    fn fill_submission(r: &mut TicketRecord) {
        r.department = Some("Physics".to_string());
        r.location = Some("Block B".to_string());
        r.complaint_details = Some("Monitor flickers".to_string());
        r.recurring_complaint = Some(YesNo::No);
        r.lab_assistant = Some("R. Iyer".to_string());
        r.lab_assistant_date = Some(date("2025-03-01"));
        r.hod = Some("Dr. Rao".to_string());
        r.hod_date = Some(date("2025-03-02"));
    }

    fn fill_through_corrective_action(r: &mut TicketRecord, resolved: YesNo) {
        fill_origination(r);
        fill_submission(r);
        r.assigned_person = Some("K. Das".to_string());
        r.in_charge_date = Some(date("2025-03-03"));
        r.verification_remarks = Some("Loose cable".to_string());
        r.materials_used = Some("Cable".to_string());
        r.resolved_inhouse = Some(resolved);
        r.resolved_remark = Some("Re-seated".to_string());
        r.consumables_needed = Some(YesNo::No);
        r.external_agency_needed = Some(YesNo::No);
        r.approx_expenditure = Some(Decimal::ZERO);
    }

    fn fill_closure(r: &mut TicketRecord) {
        r.completion_remark_lab = Some("OK".to_string());
        r.lab_completion_name = Some("R. Iyer".to_string());
        r.lab_completion_date = Some(date("2025-03-10"));
        r.completion_remark_maintenance = Some("Done".to_string());
        r.maintenance_closed_date = Some(date("2025-03-10"));
        r.equipment_status = Some(EquipmentCondition::Active);
    }

    #[test]
    fn opens_at_first_incomplete_stage() {
        let mut record = TicketRecord::new();
        fill_origination(&mut record);

        let nav = StageNavigator::new(&record);
        assert_eq!(nav.cursor(), 1);
        assert_eq!(nav.current_stage(), Stage::Submission);
    }

    #[test]
    fn advance_into_unlocked_stage_succeeds() {
        let mut record = TicketRecord::new();
        fill_origination(&mut record);

        let mut nav = StageNavigator::at(&record, 0).unwrap();
        assert_eq!(nav.advance(&record).unwrap(), Stage::Submission);
        assert_eq!(nav.cursor(), 1);
    }

    #[test]
    fn advance_past_prefix_is_rejected_and_cursor_unchanged() {
        let mut record = TicketRecord::new();
        fill_origination(&mut record);

        let mut nav = StageNavigator::at(&record, 1).unwrap();
        // Submission incomplete: Verification is locked.
        let err = nav.advance(&record).unwrap_err();
        assert_eq!(err.code, ErrorCode::StageLocked);
        assert_eq!(err.details.get("requested"), Some(&"2".to_string()));
        assert_eq!(nav.cursor(), 1);
    }

    #[test]
    fn successful_submit_unlocks_verification() {
        // Submission complete even though origination is not; the
        // submit action itself opens Verification for the next role.
        let mut record = TicketRecord::new();
        fill_submission(&mut record);

        let mut nav = StageNavigator::at(&record, 1).unwrap();
        assert_eq!(nav.advance(&record).unwrap(), Stage::Verification);
    }

    #[test]
    fn retreat_always_allowed_above_zero() {
        let record = TicketRecord::new();
        let mut nav = StageNavigator::at(&record, 1).unwrap();
        assert_eq!(nav.retreat().unwrap(), Stage::ProblemDetails);

        let err = nav.retreat().unwrap_err();
        assert_eq!(err.code, ErrorCode::StageLocked);
        assert_eq!(nav.cursor(), 0);
    }

    #[test]
    fn jump_allows_first_two_stages_on_fresh_ticket() {
        let record = TicketRecord::new();
        let mut nav = StageNavigator::new(&record);

        assert!(nav.jump_to(&record, 1).is_ok());
        assert!(nav.jump_to(&record, 0).is_ok());
        let err = nav.jump_to(&record, 2).unwrap_err();
        assert_eq!(err.code, ErrorCode::StageLocked);
    }

    #[test]
    fn jump_is_idempotent() {
        let mut record = TicketRecord::new();
        fill_through_corrective_action(&mut record, YesNo::No);

        let mut nav = StageNavigator::new(&record);
        let first = nav.jump_to(&record, 3).unwrap();
        let cursor_after_first = nav.cursor();
        let second = nav.jump_to(&record, 3).unwrap();

        assert_eq!(first, second);
        assert_eq!(nav.cursor(), cursor_after_first);
    }

    #[test]
    fn jump_cannot_skip_into_unreached_stage() {
        let mut record = TicketRecord::new();
        fill_origination(&mut record);
        fill_submission(&mut record);

        let mut nav = StageNavigator::new(&record);
        // Prefix is 2; index 2 reachable, 3 is not.
        assert!(nav.jump_to(&record, 2).is_ok());
        assert!(nav.jump_to(&record, 3).is_err());
    }

    #[test]
    fn in_house_branch_has_shorter_index_range() {
        let mut record = TicketRecord::new();
        fill_through_corrective_action(&mut record, YesNo::Yes);

        let nav = StageNavigator::new(&record);
        assert_eq!(nav.branch(), StageBranch::WithoutApproval);
        assert_eq!(nav.current_stage(), Stage::Closure);
        assert_eq!(nav.cursor(), 4);

        assert!(StageNavigator::at(&record, 5).is_err());
    }

    #[test]
    fn terminal_after_closure_completes() {
        let mut record = TicketRecord::new();
        fill_through_corrective_action(&mut record, YesNo::Yes);
        fill_closure(&mut record);

        let mut nav = StageNavigator::new(&record);
        assert!(nav.is_terminal(&record));

        let err = nav.advance(&record).unwrap_err();
        assert_eq!(err.code, ErrorCode::TicketClosed);
        // Earlier stages remain viewable.
        assert!(nav.retreat().is_ok());
    }
}
