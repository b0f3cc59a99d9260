//! Field vocabulary of the ticket record.
//!
//! `TicketField` names every stage-owned field once, so the stage
//! definition table can declare required-field sets and validation
//! errors can report outstanding fields by their persisted names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One persisted field of the ticket record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketField {
    // Origination
    TypeOfProblem,
    Date,
    EquipmentId,
    // Submission
    Department,
    Location,
    ComplaintDetails,
    RecurringComplaint,
    RecurringTimes,
    LabAssistant,
    LabAssistantDate,
    Hod,
    HodDate,
    // Verification
    AssignedPerson,
    InChargeDate,
    VerificationRemarks,
    // Corrective action
    MaterialsUsed,
    ResolvedInhouse,
    ResolvedRemark,
    ConsumablesNeeded,
    ConsumableDetails,
    ExternalAgencyNeeded,
    AgencyName,
    ApproxExpenditure,
    // Administrative approval
    AdminApprovalStatus,
    AdminApprovalDate,
    // Closure
    CompletionRemarkLab,
    LabCompletionName,
    LabCompletionDate,
    CompletionRemarkMaintenance,
    MaintenanceClosedDate,
    EquipmentStatus,
}

impl TicketField {
    /// The column name in the persisted ticket store.
    pub fn wire_name(&self) -> &'static str {
        match self {
            TicketField::TypeOfProblem => "type_of_problem",
            TicketField::Date => "date",
            TicketField::EquipmentId => "equipment_id",
            TicketField::Department => "department",
            TicketField::Location => "location",
            TicketField::ComplaintDetails => "complaint_details",
            TicketField::RecurringComplaint => "recurring_complaint",
            TicketField::RecurringTimes => "recurring_times",
            TicketField::LabAssistant => "lab_assistant",
            TicketField::LabAssistantDate => "lab_assistant_date",
            TicketField::Hod => "hod",
            TicketField::HodDate => "hod_date",
            TicketField::AssignedPerson => "assigned_person",
            TicketField::InChargeDate => "in_charge_date",
            TicketField::VerificationRemarks => "verification_remarks",
            TicketField::MaterialsUsed => "materials_used",
            TicketField::ResolvedInhouse => "resolved_inhouse",
            TicketField::ResolvedRemark => "resolved_remark",
            TicketField::ConsumablesNeeded => "consumables_needed",
            TicketField::ConsumableDetails => "consumable_details",
            TicketField::ExternalAgencyNeeded => "external_agency_needed",
            TicketField::AgencyName => "agency_name",
            TicketField::ApproxExpenditure => "approx_expenditure",
            TicketField::AdminApprovalStatus => "admin_approval_status",
            TicketField::AdminApprovalDate => "admin_approval_date",
            TicketField::CompletionRemarkLab => "completion_remark_lab",
            TicketField::LabCompletionName => "lab_completion_name",
            TicketField::LabCompletionDate => "lab_completion_date",
            TicketField::CompletionRemarkMaintenance => "completion_remark_maintenance",
            TicketField::MaintenanceClosedDate => "maintenance_closed_date",
            TicketField::EquipmentStatus => "equipment_status",
        }
    }
}

impl fmt::Display for TicketField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}
