//! Domain layer - pure workflow logic and the ticket entity.
//!
//! Nothing in this layer performs I/O except the closure synchronizer,
//! which talks to the inventory port it is handed.

pub mod foundation;
pub mod ticket;
pub mod workflow;
