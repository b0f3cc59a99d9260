//! Yes/no flag values as stored by the ticket store.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A boolean flag persisted as the strings `"yes"` / `"no"`.
///
/// The store predates this core and keeps flags as text; an unset flag
/// is an empty string, which maps to `None` at the record level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn is_yes(&self) -> bool {
        matches!(self, YesNo::Yes)
    }

    pub fn from_bool(value: bool) -> Self {
        if value {
            YesNo::Yes
        } else {
            YesNo::No
        }
    }
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        YesNo::from_bool(value)
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.is_yes() { "yes" } else { "no" })
    }
}
