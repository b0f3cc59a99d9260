//! CreateTicketHandler - origination and submission of a new ticket.
//!
//! The origination payload carries both the problem details and the
//! submission group; a ticket only exists once it has been submitted.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::domain::foundation::{CommandMetadata, DomainError, EquipmentId, TicketId, Timestamp};
use crate::domain::ticket::{ProblemCategory, TicketEvent, TicketRecord, YesNo};
use crate::domain::workflow::{outstanding_fields, Stage};
use crate::ports::{EquipmentCatalog, EventPublisher, TicketRepository};

/// Command to create and submit a ticket.
#[derive(Debug, Clone)]
pub struct CreateTicketCommand {
    // Origination
    pub type_of_problem: ProblemCategory,
    pub date: NaiveDate,
    pub equipment_id: Option<EquipmentId>,
    // Submission
    pub department: String,
    pub location: String,
    pub complaint_details: String,
    pub recurring_complaint: YesNo,
    pub recurring_times: Option<u32>,
    pub lab_assistant: String,
    pub lab_assistant_date: NaiveDate,
    pub hod: String,
    pub hod_date: NaiveDate,
}

/// Result of a successful creation.
#[derive(Debug)]
pub struct CreateTicketResult {
    pub ticket_id: TicketId,
}

/// Error type for ticket creation.
#[derive(Debug, Clone)]
pub enum CreateTicketError {
    /// The referenced equipment does not exist in the catalog.
    EquipmentNotFound(EquipmentId),
    /// Validation or collaborator error.
    Domain(DomainError),
}

impl std::fmt::Display for CreateTicketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreateTicketError::EquipmentNotFound(id) => {
                write!(f, "Equipment not found: {}", id)
            }
            CreateTicketError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CreateTicketError {}

impl From<DomainError> for CreateTicketError {
    fn from(err: DomainError) -> Self {
        CreateTicketError::Domain(err)
    }
}

/// Handler for ticket creation.
pub struct CreateTicketHandler {
    ticket_repository: Arc<dyn TicketRepository>,
    equipment_catalog: Arc<dyn EquipmentCatalog>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CreateTicketHandler {
    pub fn new(
        ticket_repository: Arc<dyn TicketRepository>,
        equipment_catalog: Arc<dyn EquipmentCatalog>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            ticket_repository,
            equipment_catalog,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateTicketCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateTicketResult, CreateTicketError> {
        // 1. The equipment reference is optional, but if present it
        //    must resolve in the catalog.
        if let Some(equipment_id) = cmd.equipment_id {
            let found = self
                .equipment_catalog
                .find_by_id(&equipment_id)
                .await?
                .is_some();
            if !found {
                return Err(CreateTicketError::EquipmentNotFound(equipment_id));
            }
        }

        // 2. Build and normalize the record.
        let mut record = TicketRecord::new();
        record.type_of_problem = Some(cmd.type_of_problem);
        record.date = Some(cmd.date);
        record.equipment_id = cmd.equipment_id;
        record.department = Some(cmd.department);
        record.location = Some(cmd.location);
        record.complaint_details = Some(cmd.complaint_details);
        record.recurring_complaint = Some(cmd.recurring_complaint);
        record.recurring_times = cmd.recurring_times;
        record.lab_assistant = Some(cmd.lab_assistant);
        record.lab_assistant_date = Some(cmd.lab_assistant_date);
        record.hod = Some(cmd.hod);
        record.hod_date = Some(cmd.hod_date);
        record.normalize();

        // 3. Both caller-owned stages must be satisfied at submit time.
        let mut missing = outstanding_fields(&record, Stage::ProblemDetails);
        missing.extend(outstanding_fields(&record, Stage::Submission));
        if !missing.is_empty() {
            return Err(DomainError::missing_fields(
                missing.iter().map(|f| f.wire_name()),
            )
            .into());
        }

        // 4. Persist and publish.
        self.ticket_repository.save(&record).await?;

        info!(
            ticket_id = %record.id(),
            user_id = %metadata.user_id,
            role = %metadata.role,
            "ticket created"
        );

        let event = TicketEvent::TicketCreated {
            ticket_id: record.id(),
            occurred_at: Timestamp::now(),
        };
        self.event_publisher.publish(event).await?;

        Ok(CreateTicketResult {
            ticket_id: record.id(),
        })
    }
}
