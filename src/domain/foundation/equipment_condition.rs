//! Equipment condition codes shared with the inventory store.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Condition of an equipment item, as recorded in the inventory.
///
/// The persisted store uses numeric codes: 0 = active, 1 = damaged,
/// 2 = under maintenance. `UnderMaintenance` is the in-flight value
/// while a ticket is open; only `Active` and `Damaged` are valid final
/// conditions at closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum EquipmentCondition {
    Active,
    Damaged,
    UnderMaintenance,
}

impl EquipmentCondition {
    /// Returns true for the two conditions a ticket may close with.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            EquipmentCondition::Active | EquipmentCondition::Damaged
        )
    }

    /// The numeric code used by the persisted store.
    pub fn wire_code(&self) -> u8 {
        (*self).into()
    }
}

impl StateMachine for EquipmentCondition {
    fn can_transition_to(&self, target: &Self) -> bool {
        use EquipmentCondition::*;
        matches!(
            (self, target),
            (Active, UnderMaintenance)
                | (Damaged, UnderMaintenance)
                | (UnderMaintenance, Active)
                | (UnderMaintenance, Damaged)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use EquipmentCondition::*;
        match self {
            Active | Damaged => vec![UnderMaintenance],
            UnderMaintenance => vec![Active, Damaged],
        }
    }
}

impl From<EquipmentCondition> for u8 {
    fn from(c: EquipmentCondition) -> u8 {
        match c {
            EquipmentCondition::Active => 0,
            EquipmentCondition::Damaged => 1,
            EquipmentCondition::UnderMaintenance => 2,
        }
    }
}

impl TryFrom<u8> for EquipmentCondition {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(EquipmentCondition::Active),
            1 => Ok(EquipmentCondition::Damaged),
            2 => Ok(EquipmentCondition::UnderMaintenance),
            other => Err(format!("unknown equipment status code: {}", other)),
        }
    }
}

impl fmt::Display for EquipmentCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EquipmentCondition::Active => "Active",
            EquipmentCondition::Damaged => "Damaged",
            EquipmentCondition::UnderMaintenance => "Under Maintenance",
        };
        write!(f, "{}", s)
    }
}
