//! Command infrastructure for handlers.
//!
//! Every command handler accepts a `CommandMetadata` alongside its
//! command. The caller supplies identity and role explicitly; the core
//! never reads them from ambient or global state.

use serde::{Deserialize, Serialize};

use super::{Role, UserId};

/// Metadata context for command handlers.
///
/// Carries the acting user, their role for the call, and an optional
/// correlation id linking related operations in one user request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The user executing this command.
    pub user_id: UserId,

    /// The role the user is acting under for this command.
    pub role: Role,

    /// Links related operations across a single user request.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
}

impl CommandMetadata {
    /// Creates new command metadata for a user acting under a role.
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self {
            user_id,
            role,
            correlation_id: None,
        }
    }

    /// Builder: add a correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Returns the correlation ID, if the caller provided one.
    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }
}
