//! In-memory adapters.
//!
//! Thread-safe map-backed implementations of the ports, used by the
//! test suites and by single-process deployments that keep their state
//! elsewhere. Each exposes a few inspection helpers on top of its port.

mod equipment_catalog;
mod event_bus;
mod inventory;
mod ticket_store;

pub use equipment_catalog::InMemoryEquipmentCatalog;
pub use event_bus::InMemoryEventBus;
pub use inventory::InMemoryInventory;
pub use ticket_store::InMemoryTicketStore;
