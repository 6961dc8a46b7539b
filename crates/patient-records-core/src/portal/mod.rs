//! Portal workflows built on the record store.
//!
//! These carry the rules the portal screens rely on: duplicate-email and
//! credential checks, care-team assignment, role gates and the audit entries
//! each action leaves behind.

mod accounts;
mod care;

pub use accounts::*;
pub use care::*;

use thiserror::Error;

use crate::models::{NewAuditLog, User};
use crate::store::{RecordStore, StoreError, StoreResult};
use crate::storage::KeyValueStorage;

/// Workflow errors.
#[derive(Error, Debug)]
pub enum PortalError {
    #[error("User with this email already exists: {0}")]
    DuplicateEmail(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Please fill in all patient information")]
    MissingPatientDetails,

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Not permitted for role {0}")]
    Forbidden(String),

    #[error("Account is not linked to a patient record")]
    AccountNotLinked,

    #[error("Patient not found: {0}")]
    PatientNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type PortalResult<T> = Result<T, PortalError>;

/// The signed-in user, or `NotAuthenticated`.
pub fn require_current_user<S: KeyValueStorage>(store: &RecordStore<S>) -> PortalResult<User> {
    store
        .get_current_user()?
        .ok_or(PortalError::NotAuthenticated)
}

/// `Forbidden` unless `actor` is an admin, doctor or nurse.
pub fn require_staff(actor: &User) -> PortalResult<()> {
    if actor.role.is_staff() {
        Ok(())
    } else {
        Err(PortalError::Forbidden(actor.role.to_string()))
    }
}

fn record_action<S: KeyValueStorage>(
    store: &mut RecordStore<S>,
    actor: &User,
    action: &str,
    details: String,
) -> StoreResult<()> {
    store.create_audit_log(NewAuditLog {
        user_id: actor.id.clone(),
        user_name: actor.full_name.clone(),
        action: action.to_string(),
        details,
    })?;
    Ok(())
}
