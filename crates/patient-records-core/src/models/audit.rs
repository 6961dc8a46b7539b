//! Audit log models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Action names written by the portal workflows.
pub mod actions {
    pub const SIGNUP: &str = "SIGNUP";
    pub const LOGIN: &str = "LOGIN";
    pub const CREATE_PATIENT: &str = "CREATE_PATIENT";
    pub const UPDATE_PATIENT: &str = "UPDATE_PATIENT";
    pub const CHECK_IN: &str = "CHECK_IN";
    pub const UPLOAD_DOCUMENT: &str = "UPLOAD_DOCUMENT";
    pub const DELETE_DOCUMENT: &str = "DELETE_DOCUMENT";
}

/// One audit trail entry. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub action: String,
    pub details: String,
    pub timestamp: DateTime<Utc>,
}

/// Fields supplied when writing an audit entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuditLog {
    pub user_id: String,
    pub user_name: String,
    pub action: String,
    pub details: String,
}

impl NewAuditLog {
    pub(crate) fn into_audit_log(self, id: String) -> AuditLog {
        AuditLog {
            id,
            user_id: self.user_id,
            user_name: self.user_name,
            action: self.action,
            details: self.details,
            timestamp: Utc::now(),
        }
    }
}
