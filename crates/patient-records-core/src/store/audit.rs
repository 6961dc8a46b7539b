//! Audit log collection operations.

use super::{keys, Record, RecordStore, StoreResult};
use crate::models::{new_record_id, AuditLog, NewAuditLog};
use crate::storage::KeyValueStorage;

impl Record for AuditLog {
    const COLLECTION: &'static str = keys::AUDIT_LOGS;

    fn id(&self) -> &str {
        &self.id
    }
}

impl<S: KeyValueStorage> RecordStore<S> {
    pub fn get_audit_logs(&self) -> StoreResult<Vec<AuditLog>> {
        self.get_all()
    }

    pub fn get_audit_log_by_id(&self, id: &str) -> StoreResult<Option<AuditLog>> {
        self.get_by_id(id)
    }

    /// Audit entries written by one user.
    pub fn get_audit_logs_by_user(&self, user_id: &str) -> StoreResult<Vec<AuditLog>> {
        self.filter(|log: &AuditLog| log.user_id == user_id)
    }

    /// Append an audit entry stamped with the current time.
    pub fn create_audit_log(&mut self, log: NewAuditLog) -> StoreResult<AuditLog> {
        let log = self.append(log.into_audit_log(new_record_id()))?;
        tracing::debug!(action = %log.action, user_id = %log.user_id, "audit entry written");
        Ok(log)
    }
}
