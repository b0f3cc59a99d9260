//! Event publisher port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::ticket::TicketEvent;

/// Publishes ticket domain events to interested consumers.
///
/// Handlers publish after a successful state change; a publish failure
/// is surfaced but must not roll back the already-persisted change.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: TicketEvent) -> Result<(), DomainError>;
}
