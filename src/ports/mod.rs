//! Ports - contracts to the collaborators of the workflow core.
//!
//! Persistence, equipment lookup, inventory sync and event publishing
//! all live behind these traits; adapters provide implementations.

mod equipment_catalog;
mod event_publisher;
mod inventory;
mod ticket_repository;

pub use equipment_catalog::{EquipmentCatalog, EquipmentSummary};
pub use event_publisher::EventPublisher;
pub use inventory::InventoryService;
pub use ticket_repository::TicketRepository;
