//! Problem categories selectable at origination.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad category of the reported problem.
///
/// Wire values are capitalized words, matching the existing store
/// (`type_of_problem` column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProblemCategory {
    System,
    Furniture,
    Civil,
    Electrical,
    Workshop,
}

impl fmt::Display for ProblemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProblemCategory::System => "System",
            ProblemCategory::Furniture => "Furniture",
            ProblemCategory::Civil => "Civil",
            ProblemCategory::Electrical => "Electrical",
            ProblemCategory::Workshop => "Workshop",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_are_capitalized() {
        assert_eq!(
            serde_json::to_string(&ProblemCategory::Electrical).unwrap(),
            "\"Electrical\""
        );
        let c: ProblemCategory = serde_json::from_str("\"Workshop\"").unwrap();
        assert_eq!(c, ProblemCategory::Workshop);
    }
}
