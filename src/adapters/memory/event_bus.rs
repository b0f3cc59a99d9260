//! In-memory event publisher.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::ticket::TicketEvent;
use crate::ports::EventPublisher;

/// Collects published events for inspection.
#[derive(Default)]
pub struct InMemoryEventBus {
    events: Mutex<Vec<TicketEvent>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events published so far, in order.
    pub fn events(&self) -> Vec<TicketEvent> {
        self.events.lock().unwrap().clone()
    }

    /// True if any event with the given type string was published.
    pub fn has_event(&self, event_type: &str) -> bool {
        self.events
            .lock()
            .unwrap()
            .iter()
            .any(|e| e.event_type() == event_type)
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: TicketEvent) -> Result<(), DomainError> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}
