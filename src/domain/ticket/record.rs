//! TicketRecord - the persisted maintenance-ticket entity.
//!
//! Field names and value encodings match the pre-existing ticket store:
//! text columns hold empty strings when unset, flags are `"yes"`/`"no"`,
//! dates are `YYYY-MM-DD` strings and `equipment_status` is a numeric
//! code. Deserialization is deliberately forgiving: anything malformed
//! reads as absent, never as an error, because the completion evaluator
//! must tolerate bad historical rows.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ApprovalStatus, EquipmentCondition, EquipmentId, TicketId};

use super::{ProblemCategory, TicketField, YesNo};

/// The single persisted workflow entity.
///
/// Fields are grouped by owning stage. No field is ever removed over a
/// ticket's life, only added; immutability after closure is enforced by
/// the application handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TicketRecord {
    #[serde(rename = "ticket_id")]
    pub id: TicketId,

    // ── Origination ────────────────────────────────────────────────
    pub type_of_problem: Option<ProblemCategory>,
    #[serde(deserialize_with = "wire::opt_date")]
    pub date: Option<NaiveDate>,
    pub equipment_id: Option<EquipmentId>,

    // ── Submission ─────────────────────────────────────────────────
    #[serde(deserialize_with = "wire::opt_text")]
    pub department: Option<String>,
    #[serde(deserialize_with = "wire::opt_text")]
    pub location: Option<String>,
    #[serde(deserialize_with = "wire::opt_text")]
    pub complaint_details: Option<String>,
    #[serde(deserialize_with = "wire::opt_flag")]
    pub recurring_complaint: Option<YesNo>,
    #[serde(deserialize_with = "wire::opt_count")]
    pub recurring_times: Option<u32>,
    #[serde(deserialize_with = "wire::opt_text")]
    pub lab_assistant: Option<String>,
    #[serde(deserialize_with = "wire::opt_date")]
    pub lab_assistant_date: Option<NaiveDate>,
    #[serde(deserialize_with = "wire::opt_text")]
    pub hod: Option<String>,
    #[serde(deserialize_with = "wire::opt_date")]
    pub hod_date: Option<NaiveDate>,

    // ── Verification ───────────────────────────────────────────────
    #[serde(deserialize_with = "wire::opt_text")]
    pub assigned_person: Option<String>,
    #[serde(deserialize_with = "wire::opt_date")]
    pub in_charge_date: Option<NaiveDate>,
    #[serde(deserialize_with = "wire::opt_text")]
    pub verification_remarks: Option<String>,

    // ── Corrective action ──────────────────────────────────────────
    #[serde(deserialize_with = "wire::opt_text")]
    pub materials_used: Option<String>,
    #[serde(deserialize_with = "wire::opt_flag")]
    pub resolved_inhouse: Option<YesNo>,
    #[serde(deserialize_with = "wire::opt_text")]
    pub resolved_remark: Option<String>,
    #[serde(deserialize_with = "wire::opt_flag")]
    pub consumables_needed: Option<YesNo>,
    #[serde(deserialize_with = "wire::opt_text")]
    pub consumable_details: Option<String>,
    #[serde(deserialize_with = "wire::opt_flag")]
    pub external_agency_needed: Option<YesNo>,
    #[serde(deserialize_with = "wire::opt_text")]
    pub agency_name: Option<String>,
    #[serde(deserialize_with = "wire::opt_money")]
    pub approx_expenditure: Option<Decimal>,

    // ── Administrative approval (conditional stage) ────────────────
    pub admin_approval_status: ApprovalStatus,
    #[serde(deserialize_with = "wire::opt_date")]
    pub admin_approval_date: Option<NaiveDate>,

    // ── Closure ────────────────────────────────────────────────────
    #[serde(deserialize_with = "wire::opt_text")]
    pub completion_remark_lab: Option<String>,
    #[serde(deserialize_with = "wire::opt_text")]
    pub lab_completion_name: Option<String>,
    #[serde(deserialize_with = "wire::opt_date")]
    pub lab_completion_date: Option<NaiveDate>,
    #[serde(deserialize_with = "wire::opt_text")]
    pub completion_remark_maintenance: Option<String>,
    #[serde(deserialize_with = "wire::opt_date")]
    pub maintenance_closed_date: Option<NaiveDate>,
    #[serde(deserialize_with = "wire::opt_condition")]
    pub equipment_status: Option<EquipmentCondition>,
}

impl TicketRecord {
    /// Creates an empty record with a fresh identifier.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> TicketId {
        self.id
    }

    /// Returns true if the ticket was resolved without external work.
    ///
    /// `None` means corrective action has not been recorded yet.
    pub fn resolved_in_house(&self) -> Option<YesNo> {
        self.resolved_inhouse
    }

    pub fn is_recurring(&self) -> bool {
        self.recurring_complaint == Some(YesNo::Yes)
    }

    /// The final equipment condition, if a terminal one has been chosen.
    ///
    /// `UnderMaintenance` is an in-flight value and never final.
    pub fn final_condition(&self) -> Option<EquipmentCondition> {
        self.equipment_status.filter(EquipmentCondition::is_final)
    }

    /// Whether a single field satisfies its stage requirement.
    ///
    /// Conditionally-required fields (`recurring_times`,
    /// `consumable_details`, `agency_name`) count as satisfied when
    /// their governing flag does not demand them; an inconsistent value
    /// left behind by old data is simply not consulted.
    pub fn satisfies(&self, field: TicketField) -> bool {
        match field {
            TicketField::TypeOfProblem => self.type_of_problem.is_some(),
            TicketField::Date => self.date.is_some(),
            TicketField::EquipmentId => self.equipment_id.is_some(),

            TicketField::Department => has_text(&self.department),
            TicketField::Location => has_text(&self.location),
            TicketField::ComplaintDetails => has_text(&self.complaint_details),
            TicketField::RecurringComplaint => self.recurring_complaint.is_some(),
            TicketField::RecurringTimes => {
                !self.is_recurring() || self.recurring_times.is_some()
            }
            TicketField::LabAssistant => has_text(&self.lab_assistant),
            TicketField::LabAssistantDate => self.lab_assistant_date.is_some(),
            TicketField::Hod => has_text(&self.hod),
            TicketField::HodDate => self.hod_date.is_some(),

            TicketField::AssignedPerson => has_text(&self.assigned_person),
            TicketField::InChargeDate => self.in_charge_date.is_some(),
            TicketField::VerificationRemarks => has_text(&self.verification_remarks),

            TicketField::MaterialsUsed => has_text(&self.materials_used),
            TicketField::ResolvedInhouse => self.resolved_inhouse.is_some(),
            TicketField::ResolvedRemark => has_text(&self.resolved_remark),
            TicketField::ConsumablesNeeded => self.consumables_needed.is_some(),
            TicketField::ConsumableDetails => {
                self.consumables_needed != Some(YesNo::Yes) || has_text(&self.consumable_details)
            }
            TicketField::ExternalAgencyNeeded => self.external_agency_needed.is_some(),
            TicketField::AgencyName => {
                self.external_agency_needed != Some(YesNo::Yes) || has_text(&self.agency_name)
            }
            TicketField::ApproxExpenditure => self.approx_expenditure.is_some(),

            TicketField::AdminApprovalStatus => self.admin_approval_status.is_decided(),
            TicketField::AdminApprovalDate => self.admin_approval_date.is_some(),

            TicketField::CompletionRemarkLab => has_text(&self.completion_remark_lab),
            TicketField::LabCompletionName => has_text(&self.lab_completion_name),
            TicketField::LabCompletionDate => self.lab_completion_date.is_some(),
            TicketField::CompletionRemarkMaintenance => {
                has_text(&self.completion_remark_maintenance)
            }
            TicketField::MaintenanceClosedDate => self.maintenance_closed_date.is_some(),
            TicketField::EquipmentStatus => self.final_condition().is_some(),
        }
    }

    /// Clears values that are only meaningful under a flag that is not
    /// set to yes. Old rows migrated from the previous system sometimes
    /// carry such orphans; they must read as absent.
    pub fn normalize(&mut self) {
        if self.recurring_complaint != Some(YesNo::Yes) {
            self.recurring_times = None;
        }
        if self.consumables_needed != Some(YesNo::Yes) {
            self.consumable_details = None;
        }
        if self.external_agency_needed != Some(YesNo::Yes) {
            self.agency_name = None;
        }
    }

    /// Returns a normalized copy without mutating self.
    pub fn normalized(&self) -> Self {
        let mut copy = self.clone();
        copy.normalize();
        copy
    }
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}

/// Forgiving deserializers for the legacy wire encodings.
mod wire {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use serde::de::Deserializer;
    use serde::Deserialize;
    use serde_json::Value;
    use std::str::FromStr;

    use crate::domain::foundation::EquipmentCondition;
    use crate::domain::ticket::YesNo;

    pub fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.and_then(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }))
    }

    pub fn opt_date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()))
    }

    pub fn opt_flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<YesNo>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.and_then(|s| match s.trim() {
            "yes" => Some(YesNo::Yes),
            "no" => Some(YesNo::No),
            _ => None,
        }))
    }

    pub fn opt_count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        let raw = Option::<Value>::deserialize(d)?;
        Ok(raw.and_then(|v| match v {
            Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }))
    }

    pub fn opt_money<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Decimal>, D::Error> {
        let raw = Option::<Value>::deserialize(d)?;
        Ok(raw.and_then(|v| match v {
            Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
            Value::String(s) => Decimal::from_str(s.trim()).ok(),
            _ => None,
        }))
    }

    pub fn opt_condition<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<EquipmentCondition>, D::Error> {
        let raw = Option::<Value>::deserialize(d)?;
        Ok(raw.and_then(|v| match v {
            Value::Number(n) => n
                .as_u64()
                .and_then(|n| u8::try_from(n).ok())
                .and_then(|code| EquipmentCondition::try_from(code).ok()),
            Value::String(s) => s
                .trim()
                .parse::<u8>()
                .ok()
                .and_then(|code| EquipmentCondition::try_from(code).ok()),
            _ => None,
        }))
    }
}
