//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField {
            field: field.into(),
        }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    MissingFields,
    EmptyField,
    OutOfRange,
    InvalidFormat,

    // Not found errors
    TicketNotFound,
    EquipmentNotFound,

    // Workflow state errors
    StageLocked,
    StageNotInBranch,
    TicketClosed,
    AlreadyClosed,

    // Infrastructure errors
    StorageError,
    InventoryError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::MissingFields => "MISSING_FIELDS",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::TicketNotFound => "TICKET_NOT_FOUND",
            ErrorCode::EquipmentNotFound => "EQUIPMENT_NOT_FOUND",
            ErrorCode::StageLocked => "STAGE_LOCKED",
            ErrorCode::StageNotInBranch => "STAGE_NOT_IN_BRANCH",
            ErrorCode::TicketClosed => "TICKET_CLOSED",
            ErrorCode::AlreadyClosed => "ALREADY_CLOSED",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::InventoryError => "INVENTORY_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

impl ErrorCode {
    /// Returns true if the caller may retry the operation unchanged.
    ///
    /// Infrastructure failures are retryable; validation and workflow
    /// state errors require a different request.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorCode::StorageError | ErrorCode::InventoryError | ErrorCode::InternalError
        )
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Creates a missing-fields error listing the outstanding persisted
    /// field names, comma separated.
    pub fn missing_fields(fields: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        let names: Vec<String> = fields
            .into_iter()
            .map(|f| f.as_ref().to_string())
            .collect();
        Self::new(
            ErrorCode::MissingFields,
            format!("Required fields are missing: {}", names.join(", ")),
        )
        .with_detail("fields", names.join(","))
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let code = match err {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::OutOfRange { .. } => ErrorCode::OutOfRange,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
        };
        DomainError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("department");
        assert_eq!(format!("{}", err), "Field 'department' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("recurring_times", 1, 999, 0);
        assert_eq!(
            format!("{}", err),
            "Field 'recurring_times' must be between 1 and 999, got 0"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::TicketNotFound, "Ticket not found");
        assert_eq!(format!("{}", err), "[TICKET_NOT_FOUND] Ticket not found");
    }

    #[test]
    fn missing_fields_lists_field_names() {
        let err = DomainError::missing_fields(["department", "location"]);
        assert_eq!(err.code, ErrorCode::MissingFields);
        assert!(err.message.contains("department"));
        assert_eq!(
            err.details.get("fields"),
            Some(&"department,location".to_string())
        );
    }

    #[test]
    fn validation_error_converts_to_domain_error() {
        let err: DomainError = ValidationError::empty_field("hod").into();
        assert_eq!(err.code, ErrorCode::EmptyField);
    }

    #[test]
    fn retryable_codes_are_infrastructure_only() {
        assert!(ErrorCode::StorageError.is_retryable());
        assert!(ErrorCode::InventoryError.is_retryable());
        assert!(!ErrorCode::StageLocked.is_retryable());
        assert!(!ErrorCode::MissingFields.is_retryable());
    }
}
