//! Workflow roles that own stages of a ticket.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The role responsible for populating a stage's fields.
///
/// Role is supplied explicitly by the caller on every command
/// (`CommandMetadata`); the core never reads it from ambient state.
/// Enforcement of who may write which stage lives in the collaborating
/// authorization layer, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Originates and submits tickets; signs off lab-side closure.
    LabAssistant,
    /// Countersigns submissions for the department.
    DepartmentHead,
    /// Verifies complaints and records corrective action.
    MaintenanceInCharge,
    /// Grants or denies administrative approval for external work.
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::LabAssistant => "Lab Assistant",
            Role::DepartmentHead => "Department Head",
            Role::MaintenanceInCharge => "Maintenance In-Charge",
            Role::Admin => "Admin",
        };
        write!(f, "{}", s)
    }
}
