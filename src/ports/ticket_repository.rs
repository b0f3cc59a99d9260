//! Ticket repository port.
//!
//! The workflow core treats every read as a full reload and performs no
//! caching across stage owners; consistency is this collaborator's
//! concern.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, TicketId};
use crate::domain::ticket::TicketRecord;

/// Repository port for ticket persistence.
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Persist a newly created ticket.
    ///
    /// # Errors
    ///
    /// - `StorageError` on persistence failure
    async fn save(&self, ticket: &TicketRecord) -> Result<(), DomainError>;

    /// Update an existing ticket.
    ///
    /// # Errors
    ///
    /// - `TicketNotFound` if the ticket doesn't exist
    /// - `StorageError` on persistence failure
    async fn update(&self, ticket: &TicketRecord) -> Result<(), DomainError>;

    /// Find a ticket by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &TicketId) -> Result<Option<TicketRecord>, DomainError>;

    /// Check whether a ticket exists.
    async fn exists(&self, id: &TicketId) -> Result<bool, DomainError>;
}
