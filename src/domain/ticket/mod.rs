//! Ticket module - the persisted maintenance-ticket entity.
//!
//! `TicketRecord` carries all stage data; the workflow module reads it
//! but never writes it. Wire field names match the existing store.

mod events;
mod field;
mod problem_category;
mod record;
mod yes_no;

pub use events::TicketEvent;
pub use field::TicketField;
pub use problem_category::ProblemCategory;
pub use record::TicketRecord;
pub use yes_no::YesNo;
