//! Patient care workflows: registration, edits, check-ins, documents and
//! the role-scoped views over them.

use chrono::NaiveDate;

use super::{record_action, PortalError, PortalResult};
use crate::models::{
    actions, AuditLog, CheckIn, FileType, Gender, NewCheckIn, NewDocument, NewPatient, Patient,
    PatientDocument, PatientUpdate, Role, User,
};
use crate::store::RecordStore;
use crate::storage::KeyValueStorage;

/// New-patient form contents. The care team is filled in on registration.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientIntake {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: Gender,
    pub blood_type: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub medical_history: String,
    pub allergies: String,
    pub current_medications: String,
}

/// A document attached through the portal.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentUpload {
    pub patient_id: String,
    pub file_name: String,
    pub file_type: FileType,
    pub file_size: u64,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

fn require_role(actor: &User, allowed: bool) -> PortalResult<()> {
    if allowed {
        Ok(())
    } else {
        Err(PortalError::Forbidden(actor.role.to_string()))
    }
}

fn require_patient<S: KeyValueStorage>(
    store: &RecordStore<S>,
    patient_id: &str,
) -> PortalResult<Patient> {
    store
        .get_patient_by_id(patient_id)?
        .ok_or_else(|| PortalError::PatientNotFound(patient_id.to_string()))
}

/// Register a patient and assign every doctor and nurse to them.
pub fn register_patient<S: KeyValueStorage>(
    store: &mut RecordStore<S>,
    actor: &User,
    intake: PatientIntake,
) -> PortalResult<Patient> {
    require_role(actor, actor.role.can_manage_patients())?;

    let assigned_to = store
        .filter(|u: &User| u.role.joins_care_team())?
        .into_iter()
        .map(|u| u.id)
        .collect();

    let patient = store.create_patient(NewPatient {
        first_name: intake.first_name,
        last_name: intake.last_name,
        date_of_birth: intake.date_of_birth,
        gender: intake.gender,
        blood_type: intake.blood_type,
        phone: intake.phone,
        email: intake.email,
        address: intake.address,
        medical_history: intake.medical_history,
        allergies: intake.allergies,
        current_medications: intake.current_medications,
        assigned_to,
    })?;

    record_action(
        store,
        actor,
        actions::CREATE_PATIENT,
        format!(
            "Created patient record for {} (Case: {})",
            patient.full_name(),
            patient.case_number
        ),
    )?;
    tracing::info!(patient_id = %patient.id, case_number = %patient.case_number, "patient registered");
    Ok(patient)
}

/// Apply an edit to a patient record. `None` when the patient does not exist.
pub fn edit_patient<S: KeyValueStorage>(
    store: &mut RecordStore<S>,
    actor: &User,
    patient_id: &str,
    update: PatientUpdate,
) -> PortalResult<Option<Patient>> {
    require_role(actor, actor.role.can_manage_patients())?;

    let Some(patient) = store.update_patient(patient_id, update)? else {
        return Ok(None);
    };
    record_action(
        store,
        actor,
        actions::UPDATE_PATIENT,
        format!("Updated patient record for {}", patient.full_name()),
    )?;
    Ok(Some(patient))
}

/// Record that `actor` checked on a patient.
pub fn check_in_patient<S: KeyValueStorage>(
    store: &mut RecordStore<S>,
    actor: &User,
    patient_id: &str,
    notes: &str,
) -> PortalResult<CheckIn> {
    require_role(actor, actor.role.is_staff())?;
    let patient = require_patient(store, patient_id)?;

    let check_in = store.create_check_in(NewCheckIn {
        patient_id: patient.id.clone(),
        user_id: actor.id.clone(),
        user_name: actor.full_name.clone(),
        user_role: actor.role,
        notes: notes.to_string(),
    })?;
    record_action(
        store,
        actor,
        actions::CHECK_IN,
        format!("{} checked on patient {}", actor.full_name, patient.full_name()),
    )?;
    Ok(check_in)
}

/// Attach a document to a patient, credited to `actor`.
pub fn upload_document<S: KeyValueStorage>(
    store: &mut RecordStore<S>,
    actor: &User,
    upload: DocumentUpload,
) -> PortalResult<PatientDocument> {
    require_role(actor, actor.role.is_staff())?;
    require_patient(store, &upload.patient_id)?;

    let document = store.create_document(NewDocument {
        patient_id: upload.patient_id,
        file_name: upload.file_name,
        file_type: upload.file_type,
        file_size: upload.file_size,
        uploaded_by: actor.full_name.clone(),
        description: upload.description,
        tags: upload.tags,
    })?;
    record_action(
        store,
        actor,
        actions::UPLOAD_DOCUMENT,
        format!("Uploaded {} for patient {}", document.file_name, document.patient_id),
    )?;
    Ok(document)
}

/// Remove a document. Returns whether it existed.
pub fn remove_document<S: KeyValueStorage>(
    store: &mut RecordStore<S>,
    actor: &User,
    document_id: &str,
) -> PortalResult<bool> {
    require_role(actor, actor.role.is_staff())?;

    let Some(document) = store.get_document_by_id(document_id)? else {
        return Ok(false);
    };
    let removed = store.delete_document(document_id)?;
    record_action(
        store,
        actor,
        actions::DELETE_DOCUMENT,
        format!("Deleted {} for patient {}", document.file_name, document.patient_id),
    )?;
    Ok(removed)
}

/// Patients `viewer` may see: all for admins, their assignments otherwise.
pub fn visible_patients<S: KeyValueStorage>(
    store: &RecordStore<S>,
    viewer: &User,
) -> PortalResult<Vec<Patient>> {
    let patients = match viewer.role {
        Role::Admin => store.get_patients()?,
        _ => store.get_patients_by_assigned_user(&viewer.id)?,
    };
    Ok(patients)
}

/// Assigned patients `viewer` has not checked on during `day` (UTC).
pub fn patients_needing_check_in<S: KeyValueStorage>(
    store: &RecordStore<S>,
    viewer: &User,
    day: NaiveDate,
) -> PortalResult<Vec<Patient>> {
    let check_ins = store.filter(|c: &CheckIn| c.user_id == viewer.id && c.is_on(day))?;
    let mut patients = store.get_patients_by_assigned_user(&viewer.id)?;
    patients.retain(|p| !check_ins.iter().any(|c| c.patient_id == p.id));
    Ok(patients)
}

/// Case-insensitive substring match on "first last".
pub fn search_patients<'a>(patients: &'a [Patient], query: &str) -> Vec<&'a Patient> {
    let query = query.to_lowercase();
    patients
        .iter()
        .filter(|p| p.full_name().to_lowercase().contains(&query))
        .collect()
}

/// Full names of the doctors on a patient's care team.
pub fn care_team_doctors<'a>(users: &'a [User], patient: &Patient) -> Vec<&'a str> {
    users
        .iter()
        .filter(|u| u.role == Role::Doctor && patient.is_assigned_to(&u.id))
        .map(|u| u.full_name.as_str())
        .collect()
}

/// The full audit trail, admins only.
pub fn audit_trail<S: KeyValueStorage>(
    store: &RecordStore<S>,
    viewer: &User,
) -> PortalResult<Vec<AuditLog>> {
    require_role(viewer, viewer.role.can_view_audit_log())?;
    Ok(store.get_audit_logs()?)
}

/// A patient account's own record and documents.
pub fn patient_portal<S: KeyValueStorage>(
    store: &RecordStore<S>,
    viewer: &User,
) -> PortalResult<(Patient, Vec<PatientDocument>)> {
    require_role(viewer, viewer.role == Role::Patient)?;
    let patient_id = viewer
        .patient_id
        .as_deref()
        .ok_or(PortalError::AccountNotLinked)?;
    let patient = require_patient(store, patient_id)?;
    let documents = store.get_patient_documents(patient_id)?;
    Ok((patient, documents))
}
