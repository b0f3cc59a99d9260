//! Stage definition table - the single source of truth for stage order,
//! ownership and required fields.
//!
//! This is static data, not derived. Every other workflow component
//! consults it; nothing else in the crate hard-codes a stage's field
//! set. Operations are lookup only.

use crate::domain::foundation::Role;
use crate::domain::ticket::TicketField;

use super::Stage;

/// One row of the stage catalogue.
#[derive(Debug, Clone, Copy)]
pub struct StageDefinition {
    pub stage: Stage,
    pub label: &'static str,
    /// The role that populates this stage's fields. Closure is shared
    /// between lab and maintenance; the lab assistant signs last.
    pub owner: Role,
    /// Fields whose presence marks the stage complete. The admin
    /// approval stage additionally special-cases pending status in the
    /// completion evaluator.
    pub required: &'static [TicketField],
}

/// All six stages in canonical order.
pub const STAGE_TABLE: [StageDefinition; 6] = [
    StageDefinition {
        stage: Stage::ProblemDetails,
        label: "Problem Details",
        owner: Role::LabAssistant,
        required: &[TicketField::TypeOfProblem, TicketField::Date],
    },
    StageDefinition {
        stage: Stage::Submission,
        label: "Submission",
        owner: Role::LabAssistant,
        required: &[
            TicketField::Department,
            TicketField::Location,
            TicketField::ComplaintDetails,
            TicketField::RecurringComplaint,
            TicketField::RecurringTimes,
            TicketField::LabAssistant,
            TicketField::LabAssistantDate,
            TicketField::Hod,
            TicketField::HodDate,
        ],
    },
    StageDefinition {
        stage: Stage::Verification,
        label: "Verification",
        owner: Role::MaintenanceInCharge,
        required: &[
            TicketField::AssignedPerson,
            TicketField::InChargeDate,
            TicketField::VerificationRemarks,
        ],
    },
    StageDefinition {
        stage: Stage::CorrectiveAction,
        label: "Corrective Action",
        owner: Role::MaintenanceInCharge,
        required: &[
            TicketField::MaterialsUsed,
            TicketField::ResolvedInhouse,
            TicketField::ResolvedRemark,
            TicketField::ConsumablesNeeded,
            TicketField::ConsumableDetails,
            TicketField::ExternalAgencyNeeded,
            TicketField::AgencyName,
            TicketField::ApproxExpenditure,
        ],
    },
    StageDefinition {
        stage: Stage::AdminApproval,
        label: "Administrative Approval",
        owner: Role::Admin,
        required: &[TicketField::AdminApprovalStatus],
    },
    StageDefinition {
        stage: Stage::Closure,
        label: "Closure",
        owner: Role::LabAssistant,
        required: &[
            TicketField::CompletionRemarkLab,
            TicketField::LabCompletionName,
            TicketField::LabCompletionDate,
            TicketField::CompletionRemarkMaintenance,
            TicketField::MaintenanceClosedDate,
            TicketField::EquipmentStatus,
        ],
    },
];

/// Looks up the definition row for a stage.
pub fn stage_definition(stage: Stage) -> &'static StageDefinition {
    STAGE_TABLE
        .iter()
        .find(|d| d.stage == stage)
        .expect("every Stage variant has a definition row")
}
