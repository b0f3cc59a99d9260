//! In-memory equipment catalog.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EquipmentId, UserId};
use crate::ports::{EquipmentCatalog, EquipmentSummary};

/// List-backed `EquipmentCatalog`. Items may be owned by a user or
/// unassigned; only owned items show up as origination candidates.
#[derive(Default)]
pub struct InMemoryEquipmentCatalog {
    items: Mutex<Vec<(Option<UserId>, EquipmentSummary)>>,
}

impl InMemoryEquipmentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an unassigned item.
    pub fn insert(&self, summary: EquipmentSummary) {
        self.items.lock().unwrap().push((None, summary));
    }

    /// Adds an item owned by a user.
    pub fn insert_owned(&self, owner: UserId, summary: EquipmentSummary) {
        self.items.lock().unwrap().push((Some(owner), summary));
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl EquipmentCatalog for InMemoryEquipmentCatalog {
    async fn find_candidates(
        &self,
        owner: &UserId,
    ) -> Result<Vec<EquipmentSummary>, DomainError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|(item_owner, _)| item_owner.as_ref() == Some(owner))
            .map(|(_, summary)| summary.clone())
            .collect())
    }

    async fn find_by_id(
        &self,
        id: &EquipmentId,
    ) -> Result<Option<EquipmentSummary>, DomainError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .find(|(_, summary)| summary.id == *id)
            .map(|(_, summary)| summary.clone()))
    }
}
