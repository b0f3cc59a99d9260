//! Equipment catalog port - read-only lookup of equipment the caller
//! may attach a ticket to.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, EquipmentCondition, EquipmentId, UserId};

/// Summary of one equipment item, as shown when originating a ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentSummary {
    pub id: EquipmentId,
    pub name: String,
    pub condition: EquipmentCondition,
}

/// Read port over the equipment inventory.
#[async_trait]
pub trait EquipmentCatalog: Send + Sync {
    /// Equipment belonging to a lab owner, for the origination form.
    async fn find_candidates(&self, owner: &UserId)
        -> Result<Vec<EquipmentSummary>, DomainError>;

    /// Look up one equipment item. Returns `None` if unknown.
    async fn find_by_id(
        &self,
        id: &EquipmentId,
    ) -> Result<Option<EquipmentSummary>, DomainError>;
}
