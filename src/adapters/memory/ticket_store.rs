//! In-memory ticket repository.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, TicketId};
use crate::domain::ticket::TicketRecord;
use crate::ports::TicketRepository;

/// Map-backed `TicketRepository`.
#[derive(Default)]
pub struct InMemoryTicketStore {
    tickets: Mutex<HashMap<TicketId, TicketRecord>>,
}

impl InMemoryTicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a record directly, bypassing the port. Test setup only
    /// needs the record to exist, not to have gone through a handler.
    pub fn insert(&self, ticket: TicketRecord) {
        self.tickets.lock().unwrap().insert(ticket.id(), ticket);
    }

    /// Reads a record directly for assertions.
    pub fn get(&self, id: &TicketId) -> Option<TicketRecord> {
        self.tickets.lock().unwrap().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.tickets.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TicketRepository for InMemoryTicketStore {
    async fn save(&self, ticket: &TicketRecord) -> Result<(), DomainError> {
        self.tickets
            .lock()
            .unwrap()
            .insert(ticket.id(), ticket.clone());
        Ok(())
    }

    async fn update(&self, ticket: &TicketRecord) -> Result<(), DomainError> {
        let mut tickets = self.tickets.lock().unwrap();
        if !tickets.contains_key(&ticket.id()) {
            return Err(DomainError::new(
                ErrorCode::TicketNotFound,
                format!("Ticket not found: {}", ticket.id()),
            ));
        }
        tickets.insert(ticket.id(), ticket.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &TicketId) -> Result<Option<TicketRecord>, DomainError> {
        Ok(self.tickets.lock().unwrap().get(id).cloned())
    }

    async fn exists(&self, id: &TicketId) -> Result<bool, DomainError> {
        Ok(self.tickets.lock().unwrap().contains_key(id))
    }
}
