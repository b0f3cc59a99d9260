//! Workflow module - the stage state machine over a ticket record.
//!
//! Everything here is a pure function of an in-memory record snapshot,
//! except the closure synchronizer which drives the inventory port.
//! Stage order lives in one place (the definition table); branch-aware
//! code always goes through `StageBranch` before doing index math.

mod branch;
mod closure;
mod completion;
mod definition;
mod navigator;
mod progress;
mod stage;

pub use branch::StageBranch;
pub use closure::{ClosureSynchronizer, SyncOutcome};
pub use completion::{is_stage_complete, outstanding_fields};
pub use definition::{stage_definition, StageDefinition, STAGE_TABLE};
pub use navigator::StageNavigator;
pub use progress::{completed_prefix, progress_fraction, WorkflowProgress};
pub use stage::Stage;
