//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums and error types that form
//! the vocabulary of the labtrack domain.

mod approval_status;
mod command;
mod equipment_condition;
mod errors;
mod ids;
mod role;
mod state_machine;
mod timestamp;

pub use approval_status::ApprovalStatus;
pub use command::CommandMetadata;
pub use equipment_condition::EquipmentCondition;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{EquipmentId, TicketId, UserId};
pub use role::Role;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
