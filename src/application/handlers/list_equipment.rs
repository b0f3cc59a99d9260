//! ListEquipmentHandler - the equipment choices shown when originating
//! a ticket.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, DomainError};
use crate::ports::{EquipmentCatalog, EquipmentSummary};

/// Query handler listing the caller's equipment.
pub struct ListEquipmentHandler {
    equipment_catalog: Arc<dyn EquipmentCatalog>,
}

impl ListEquipmentHandler {
    pub fn new(equipment_catalog: Arc<dyn EquipmentCatalog>) -> Self {
        Self { equipment_catalog }
    }

    pub async fn handle(
        &self,
        metadata: CommandMetadata,
    ) -> Result<Vec<EquipmentSummary>, DomainError> {
        self.equipment_catalog
            .find_candidates(&metadata.user_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryEquipmentCatalog;
    use crate::domain::foundation::{EquipmentCondition, EquipmentId, Role, UserId};

    fn summary(name: &str) -> EquipmentSummary {
        EquipmentSummary {
            id: EquipmentId::new(),
            name: name.to_string(),
            condition: EquipmentCondition::Active,
        }
    }

    #[tokio::test]
    async fn lists_only_the_callers_equipment() {
        let catalog = Arc::new(InMemoryEquipmentCatalog::new());
        let owner = UserId::new("lab-1").unwrap();
        catalog.insert_owned(owner.clone(), summary("Oscilloscope"));
        catalog.insert_owned(UserId::new("lab-2").unwrap(), summary("Centrifuge"));
        catalog.insert(summary("Unassigned spare"));

        let handler = ListEquipmentHandler::new(catalog);
        let listed = handler
            .handle(CommandMetadata::new(owner, Role::LabAssistant))
            .await
            .unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Oscilloscope");
    }

    #[tokio::test]
    async fn empty_catalog_lists_nothing() {
        let handler = ListEquipmentHandler::new(Arc::new(InMemoryEquipmentCatalog::new()));
        let listed = handler
            .handle(CommandMetadata::new(
                UserId::new("lab-1").unwrap(),
                Role::LabAssistant,
            ))
            .await
            .unwrap();
        assert!(listed.is_empty());
    }
}
