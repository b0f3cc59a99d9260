//! The six canonical workflow stages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One named phase of the maintenance workflow.
///
/// Canonical order and required fields are declared by the stage
/// definition table; whether `AdminApproval` participates at all is
/// decided per ticket by `StageBranch`. Never do index arithmetic on
/// this enum directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    ProblemDetails,
    Submission,
    Verification,
    CorrectiveAction,
    AdminApproval,
    Closure,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::ProblemDetails => "Problem Details",
            Stage::Submission => "Submission",
            Stage::Verification => "Verification",
            Stage::CorrectiveAction => "Corrective Action",
            Stage::AdminApproval => "Administrative Approval",
            Stage::Closure => "Closure",
        };
        write!(f, "{}", s)
    }
}
