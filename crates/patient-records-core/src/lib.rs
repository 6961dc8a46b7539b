//! Patient Records Core Library
//!
//! Local-first record store behind a small patient management portal.
//!
//! # Architecture
//!
//! ```text
//!   Host UI (sign-up, dashboard, patient pages, audit view)
//!                         │
//!                 [FFI: PatientRecordsCore]
//!                         │
//!                 portal workflows ── role gates, audit entries
//!                         │
//!                   RecordStore ── whole-collection read/modify/write
//!                         │
//!        KeyValueStorage: memory │ sqlite │ detached
//! ```
//!
//! Every collection is one JSON array under a fixed key:
//! `users`, `patients`, `checkIns`, `auditLogs`, `patientDocuments`, plus
//! the `currentUserId` session scalar.
//!
//! # Modules
//!
//! - [`storage`]: key/value backends
//! - [`store`]: collection operations, seeding, case numbers, session
//! - [`models`]: domain types (User, Patient, CheckIn, AuditLog, PatientDocument)
//! - [`portal`]: account and care workflows
//! - [`config`]: TOML configuration

pub mod config;
pub mod models;
pub mod portal;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use config::{ConfigError, DynStorage, StorageConfig, StoreConfig};
pub use models::{
    AuditLog, CheckIn, FileType, Gender, NewAuditLog, NewCheckIn, NewDocument, NewPatient,
    NewUser, Patient, PatientDocument, PatientUpdate, Role, User,
};
pub use portal::{PortalError, PortalResult};
pub use storage::{DetachedStorage, KeyValueStorage, MemoryStorage, SqliteStorage};
pub use store::{Record, RecordStore, StoreError, StoreResult};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Store = RecordStore<DynStorage>;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum PatientRecordsError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Duplicate email: {0}")]
    DuplicateEmail(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<StoreError> for PatientRecordsError {
    fn from(e: StoreError) -> Self {
        PatientRecordsError::StorageError(e.to_string())
    }
}

impl From<PortalError> for PatientRecordsError {
    fn from(e: PortalError) -> Self {
        match e {
            PortalError::DuplicateEmail(email) => PatientRecordsError::DuplicateEmail(email),
            // Unknown email and wrong password look the same from outside
            PortalError::UserNotFound(_) | PortalError::InvalidPassword => {
                PatientRecordsError::InvalidCredentials
            }
            PortalError::MissingPatientDetails => PatientRecordsError::InvalidInput(e.to_string()),
            PortalError::NotAuthenticated => PatientRecordsError::NotAuthenticated,
            PortalError::Forbidden(role) => PatientRecordsError::Forbidden(role),
            PortalError::AccountNotLinked => PatientRecordsError::NotFound(e.to_string()),
            PortalError::PatientNotFound(id) => PatientRecordsError::NotFound(id),
            PortalError::Store(e) => e.into(),
        }
    }
}

impl From<ConfigError> for PatientRecordsError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Store(e) => e.into(),
            other => PatientRecordsError::ConfigError(other.to_string()),
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for PatientRecordsError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        PatientRecordsError::StorageError(format!("Lock poisoned: {}", e))
    }
}

fn parse_field<T: std::str::FromStr<Err = String>>(value: &str) -> Result<T, PatientRecordsError> {
    value.parse().map_err(PatientRecordsError::InvalidInput)
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Install a `tracing` subscriber. `RUST_LOG` overrides `filter` when set.
///
/// Safe to call more than once; later calls are ignored.
#[uniffi::export]
pub fn init_logging(filter: String) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Open or create a SQLite-backed store at the given path.
#[uniffi::export]
pub fn open_store(path: String) -> Result<Arc<PatientRecordsCore>, PatientRecordsError> {
    let config = StoreConfig {
        storage: StorageConfig::Sqlite { path: path.into() },
        ..Default::default()
    };
    PatientRecordsCore::from_config(&config)
}

/// Create an in-memory store with demo data (for testing).
#[uniffi::export]
pub fn open_store_in_memory() -> Result<Arc<PatientRecordsCore>, PatientRecordsError> {
    PatientRecordsCore::from_config(&StoreConfig::default())
}

/// Open a store described by a TOML config file and start logging.
#[uniffi::export]
pub fn open_store_from_config(path: String) -> Result<Arc<PatientRecordsCore>, PatientRecordsError> {
    let config = StoreConfig::load(&path)?;
    init_logging(config.log_filter.clone());
    PatientRecordsCore::from_config(&config)
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe store wrapper for FFI.
#[derive(uniffi::Object)]
pub struct PatientRecordsCore {
    store: Arc<Mutex<Store>>,
}

impl PatientRecordsCore {
    fn from_config(config: &StoreConfig) -> Result<Arc<Self>, PatientRecordsError> {
        let store = config.open_store()?;
        Ok(Arc::new(Self {
            store: Arc::new(Mutex::new(store)),
        }))
    }

    /// Run `f` as the signed-in user.
    fn as_current_user<R>(
        &self,
        f: impl FnOnce(&mut Store, &User) -> PortalResult<R>,
    ) -> Result<R, PatientRecordsError> {
        let mut store = self.store.lock()?;
        let actor = portal::require_current_user(&*store)?;
        Ok(f(&mut *store, &actor)?)
    }

    /// Run a read as a signed-in staff member.
    fn as_staff<R>(
        &self,
        f: impl FnOnce(&Store) -> PortalResult<R>,
    ) -> Result<R, PatientRecordsError> {
        self.as_current_user(|store, actor| {
            portal::require_staff(actor)?;
            f(&*store)
        })
    }
}

#[uniffi::export]
impl PatientRecordsCore {
    // =========================================================================
    // Account Operations
    // =========================================================================

    /// Create an account.
    pub fn sign_up(&self, form: FfiSignUp) -> Result<FfiUser, PatientRecordsError> {
        let form: portal::SignUp = form.try_into()?;
        let mut store = self.store.lock()?;
        let user = portal::sign_up(&mut *store, form)?;
        Ok(user.into())
    }

    /// Check credentials and start a session.
    pub fn log_in(&self, email: String, password: String) -> Result<FfiUser, PatientRecordsError> {
        let mut store = self.store.lock()?;
        let user = portal::log_in(&mut *store, &email, &password)?;
        Ok(user.into())
    }

    /// End the session.
    pub fn log_out(&self) -> Result<(), PatientRecordsError> {
        let mut store = self.store.lock()?;
        portal::log_out(&mut *store)?;
        Ok(())
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Result<Option<FfiUser>, PatientRecordsError> {
        let store = self.store.lock()?;
        Ok(store.get_current_user()?.map(|u| u.into()))
    }

    /// List all accounts (staff only).
    pub fn list_users(&self) -> Result<Vec<FfiUser>, PatientRecordsError> {
        let users = self.as_staff(|store| Ok(store.get_users()?))?;
        Ok(users.into_iter().map(|u| u.into()).collect())
    }

    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// Patients visible to the signed-in user.
    pub fn visible_patients(&self) -> Result<Vec<FfiPatient>, PatientRecordsError> {
        let patients = self.as_current_user(|store, actor| portal::visible_patients(store, actor))?;
        Ok(patients.into_iter().map(|p| p.into()).collect())
    }

    /// Get a patient by ID (staff only).
    pub fn get_patient(&self, id: String) -> Result<Option<FfiPatient>, PatientRecordsError> {
        let patient = self.as_staff(|store| Ok(store.get_patient_by_id(&id)?))?;
        Ok(patient.map(|p| p.into()))
    }

    /// Search visible patients by name.
    pub fn search_patients(&self, query: String) -> Result<Vec<FfiPatient>, PatientRecordsError> {
        let patients = self.as_current_user(|store, actor| portal::visible_patients(store, actor))?;
        Ok(portal::search_patients(&patients, &query)
            .into_iter()
            .map(|p| p.clone().into())
            .collect())
    }

    /// Register a patient as the signed-in user.
    pub fn register_patient(
        &self,
        intake: FfiPatientIntake,
    ) -> Result<FfiPatient, PatientRecordsError> {
        let intake: portal::PatientIntake = intake.try_into()?;
        let patient =
            self.as_current_user(|store, actor| portal::register_patient(store, actor, intake))?;
        Ok(patient.into())
    }

    /// Edit a patient as the signed-in user.
    pub fn edit_patient(
        &self,
        id: String,
        update: FfiPatientUpdate,
    ) -> Result<Option<FfiPatient>, PatientRecordsError> {
        let update: PatientUpdate = update.try_into()?;
        let patient =
            self.as_current_user(|store, actor| portal::edit_patient(store, actor, &id, update))?;
        Ok(patient.map(|p| p.into()))
    }

    /// Assigned patients the signed-in user has not checked on today.
    pub fn patients_needing_check_in(&self) -> Result<Vec<FfiPatient>, PatientRecordsError> {
        let today = chrono::Utc::now().date_naive();
        let patients = self.as_current_user(|store, actor| {
            portal::patients_needing_check_in(store, actor, today)
        })?;
        Ok(patients.into_iter().map(|p| p.into()).collect())
    }

    /// The signed-in patient's own record and documents.
    pub fn patient_portal(&self) -> Result<FfiPatientPortal, PatientRecordsError> {
        let (patient, documents) =
            self.as_current_user(|store, actor| portal::patient_portal(store, actor))?;
        Ok(FfiPatientPortal {
            patient: patient.into(),
            documents: documents.into_iter().map(|d| d.into()).collect(),
        })
    }

    // =========================================================================
    // Check-in Operations
    // =========================================================================

    /// Check on a patient as the signed-in user.
    pub fn check_in_patient(
        &self,
        patient_id: String,
        notes: String,
    ) -> Result<FfiCheckIn, PatientRecordsError> {
        let check_in = self.as_current_user(|store, actor| {
            portal::check_in_patient(store, actor, &patient_id, &notes)
        })?;
        Ok(check_in.into())
    }

    /// Check-ins for a patient, oldest first (staff only).
    pub fn check_ins_for_patient(
        &self,
        patient_id: String,
    ) -> Result<Vec<FfiCheckIn>, PatientRecordsError> {
        let check_ins = self.as_staff(|store| Ok(store.get_check_ins_by_patient(&patient_id)?))?;
        Ok(check_ins.into_iter().map(|c| c.into()).collect())
    }

    // =========================================================================
    // Document Operations
    // =========================================================================

    /// Attach a document as the signed-in user.
    pub fn upload_document(
        &self,
        upload: FfiDocumentUpload,
    ) -> Result<FfiDocument, PatientRecordsError> {
        let upload: portal::DocumentUpload = upload.try_into()?;
        let document =
            self.as_current_user(|store, actor| portal::upload_document(store, actor, upload))?;
        Ok(document.into())
    }

    /// Remove a document as the signed-in user.
    pub fn remove_document(&self, document_id: String) -> Result<bool, PatientRecordsError> {
        self.as_current_user(|store, actor| portal::remove_document(store, actor, &document_id))
    }

    /// Documents attached to a patient (staff only).
    pub fn patient_documents(
        &self,
        patient_id: String,
    ) -> Result<Vec<FfiDocument>, PatientRecordsError> {
        let documents = self.as_staff(|store| Ok(store.get_patient_documents(&patient_id)?))?;
        Ok(documents.into_iter().map(|d| d.into()).collect())
    }

    // =========================================================================
    // Audit Operations
    // =========================================================================

    /// The audit trail (admins only).
    pub fn audit_trail(&self) -> Result<Vec<FfiAuditLog>, PatientRecordsError> {
        let logs = self.as_current_user(|store, actor| portal::audit_trail(store, actor))?;
        Ok(logs.into_iter().map(|l| l.into()).collect())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe user. The password is never handed back across the boundary.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiUser {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub patient_id: Option<String>,
}

impl From<User> for FfiUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role.to_string(),
            patient_id: user.patient_id,
        }
    }
}

/// FFI-safe sign-up form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSignUp {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: String,
    pub date_of_birth: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl TryFrom<FfiSignUp> for portal::SignUp {
    type Error = PatientRecordsError;

    fn try_from(form: FfiSignUp) -> Result<Self, Self::Error> {
        let role: Role = parse_field(&form.role)?;
        let patient_details = (role == Role::Patient).then(|| portal::PatientDetails {
            date_of_birth: form.date_of_birth.unwrap_or_default(),
            phone: form.phone.unwrap_or_default(),
            address: form.address.unwrap_or_default(),
        });
        Ok(portal::SignUp {
            email: form.email,
            password: form.password,
            full_name: form.full_name,
            role,
            patient_details,
        })
    }
}

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: String,
    pub case_number: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub blood_type: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub medical_history: String,
    pub allergies: String,
    pub current_medications: String,
    pub assigned_to: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id,
            case_number: patient.case_number,
            first_name: patient.first_name,
            last_name: patient.last_name,
            date_of_birth: patient.date_of_birth,
            gender: patient.gender.to_string(),
            blood_type: patient.blood_type,
            phone: patient.phone,
            email: patient.email,
            address: patient.address,
            medical_history: patient.medical_history,
            allergies: patient.allergies,
            current_medications: patient.current_medications,
            assigned_to: patient.assigned_to,
            created_at: patient.created_at.to_rfc3339(),
            updated_at: patient.updated_at.to_rfc3339(),
        }
    }
}

/// FFI-safe new-patient form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientIntake {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub blood_type: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub medical_history: String,
    pub allergies: String,
    pub current_medications: String,
}

impl TryFrom<FfiPatientIntake> for portal::PatientIntake {
    type Error = PatientRecordsError;

    fn try_from(intake: FfiPatientIntake) -> Result<Self, Self::Error> {
        Ok(portal::PatientIntake {
            gender: parse_field(&intake.gender)?,
            first_name: intake.first_name,
            last_name: intake.last_name,
            date_of_birth: intake.date_of_birth,
            blood_type: intake.blood_type,
            phone: intake.phone,
            email: intake.email,
            address: intake.address,
            medical_history: intake.medical_history,
            allergies: intake.allergies,
            current_medications: intake.current_medications,
        })
    }
}

/// FFI-safe partial patient update.
#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiPatientUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub blood_type: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub medical_history: Option<String>,
    pub allergies: Option<String>,
    pub current_medications: Option<String>,
    pub assigned_to: Option<Vec<String>>,
}

impl TryFrom<FfiPatientUpdate> for PatientUpdate {
    type Error = PatientRecordsError;

    fn try_from(update: FfiPatientUpdate) -> Result<Self, Self::Error> {
        Ok(PatientUpdate {
            gender: update.gender.as_deref().map(parse_field).transpose()?,
            first_name: update.first_name,
            last_name: update.last_name,
            date_of_birth: update.date_of_birth,
            blood_type: update.blood_type,
            phone: update.phone,
            email: update.email,
            address: update.address,
            medical_history: update.medical_history,
            allergies: update.allergies,
            current_medications: update.current_medications,
            assigned_to: update.assigned_to,
        })
    }
}

/// FFI-safe check-in.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCheckIn {
    pub id: String,
    pub patient_id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_role: String,
    pub notes: String,
    pub timestamp: String,
}

impl From<CheckIn> for FfiCheckIn {
    fn from(check_in: CheckIn) -> Self {
        Self {
            id: check_in.id,
            patient_id: check_in.patient_id,
            user_id: check_in.user_id,
            user_name: check_in.user_name,
            user_role: check_in.user_role.to_string(),
            notes: check_in.notes,
            timestamp: check_in.timestamp.to_rfc3339(),
        }
    }
}

/// FFI-safe audit entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAuditLog {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub action: String,
    pub details: String,
    pub timestamp: String,
}

impl From<AuditLog> for FfiAuditLog {
    fn from(log: AuditLog) -> Self {
        Self {
            id: log.id,
            user_id: log.user_id,
            user_name: log.user_name,
            action: log.action,
            details: log.details,
            timestamp: log.timestamp.to_rfc3339(),
        }
    }
}

/// FFI-safe document metadata.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDocument {
    pub id: String,
    pub patient_id: String,
    pub file_name: String,
    pub file_type: String,
    pub file_url: String,
    pub file_size: u64,
    pub uploaded_by: String,
    pub uploaded_at: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

impl From<PatientDocument> for FfiDocument {
    fn from(document: PatientDocument) -> Self {
        Self {
            id: document.id,
            patient_id: document.patient_id,
            file_name: document.file_name,
            file_type: document.file_type.to_string(),
            file_url: document.file_url,
            file_size: document.file_size,
            uploaded_by: document.uploaded_by,
            uploaded_at: document.uploaded_at.to_rfc3339(),
            description: document.description,
            tags: document.tags.unwrap_or_default(),
        }
    }
}

/// FFI-safe document upload.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDocumentUpload {
    pub patient_id: String,
    pub file_name: String,
    pub file_type: String,
    pub file_size: u64,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl TryFrom<FfiDocumentUpload> for portal::DocumentUpload {
    type Error = PatientRecordsError;

    fn try_from(upload: FfiDocumentUpload) -> Result<Self, Self::Error> {
        Ok(portal::DocumentUpload {
            file_type: parse_field(&upload.file_type)?,
            patient_id: upload.patient_id,
            file_name: upload.file_name,
            file_size: upload.file_size,
            description: upload.description,
            tags: upload.tags,
        })
    }
}

/// FFI-safe patient self-service view.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientPortal {
    pub patient: FfiPatient,
    pub documents: Vec<FfiDocument>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_in(email: &str, password: &str) -> Arc<PatientRecordsCore> {
        let core = open_store_in_memory().unwrap();
        core.log_in(email.into(), password.into()).unwrap();
        core
    }

    #[test]
    fn test_requires_session() {
        let core = open_store_in_memory().unwrap();
        assert!(matches!(
            core.visible_patients(),
            Err(PatientRecordsError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_credentials_errors_are_uniform() {
        let core = open_store_in_memory().unwrap();
        assert!(matches!(
            core.log_in("missing@x.com".into(), "x".into()),
            Err(PatientRecordsError::InvalidCredentials)
        ));
        assert!(matches!(
            core.log_in("admin@hospital.com".into(), "nope".into()),
            Err(PatientRecordsError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_register_and_edit_through_ffi() {
        let core = signed_in("doctor@hospital.com", "doctor123");
        let patient = core
            .register_patient(FfiPatientIntake {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                date_of_birth: "1815-12-10".into(),
                gender: "female".into(),
                blood_type: "O+".into(),
                phone: "+44".into(),
                email: "ada@email.com".into(),
                address: "London".into(),
                medical_history: String::new(),
                allergies: String::new(),
                current_medications: String::new(),
            })
            .unwrap();
        assert!(patient.case_number.starts_with("004-"));

        let edited = core
            .edit_patient(
                patient.id.clone(),
                FfiPatientUpdate {
                    gender: Some("other".into()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(edited.gender, "other");

        let bad = core.edit_patient(
            patient.id,
            FfiPatientUpdate {
                gender: Some("unknown".into()),
                ..Default::default()
            },
        );
        assert!(matches!(bad, Err(PatientRecordsError::InvalidInput(_))));
    }

    #[test]
    fn test_patient_sign_up_and_portal() {
        let core = open_store_in_memory().unwrap();
        let user = core
            .sign_up(FfiSignUp {
                email: "pat@email.com".into(),
                password: "pw".into(),
                full_name: "Pat Doe".into(),
                role: "patient".into(),
                date_of_birth: Some("1990-01-01".into()),
                phone: Some("+1".into()),
                address: Some("Somewhere".into()),
            })
            .unwrap();
        assert!(user.patient_id.is_some());

        core.log_in("pat@email.com".into(), "pw".into()).unwrap();
        let view = core.patient_portal().unwrap();
        assert_eq!(view.patient.first_name, "Pat");
        assert!(view.documents.is_empty());
        assert!(matches!(core.audit_trail(), Err(PatientRecordsError::Forbidden(_))));
    }

    #[test]
    fn test_check_in_queue() {
        let core = signed_in("nurse@hospital.com", "nurse123");
        assert_eq!(core.patients_needing_check_in().unwrap().len(), 3);
        core.check_in_patient("1".into(), "OK".into()).unwrap();
        assert_eq!(core.patients_needing_check_in().unwrap().len(), 2);
        assert_eq!(core.check_ins_for_patient("1".into()).unwrap().len(), 1);
    }

    #[test]
    fn test_record_reads_require_session() {
        let core = open_store_in_memory().unwrap();
        assert!(matches!(core.list_users(), Err(PatientRecordsError::NotAuthenticated)));
        assert!(matches!(
            core.get_patient("1".into()),
            Err(PatientRecordsError::NotAuthenticated)
        ));
        assert!(matches!(
            core.check_ins_for_patient("1".into()),
            Err(PatientRecordsError::NotAuthenticated)
        ));
        assert!(matches!(
            core.patient_documents("1".into()),
            Err(PatientRecordsError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_record_reads_forbidden_for_patient_accounts() {
        let core = open_store_in_memory().unwrap();
        core.sign_up(FfiSignUp {
            email: "pat@email.com".into(),
            password: "pw".into(),
            full_name: "Pat Doe".into(),
            role: "patient".into(),
            date_of_birth: Some("1990-01-01".into()),
            phone: Some("+1".into()),
            address: Some("Somewhere".into()),
        })
        .unwrap();
        core.log_in("pat@email.com".into(), "pw".into()).unwrap();

        assert!(matches!(core.list_users(), Err(PatientRecordsError::Forbidden(role)) if role == "patient"));
        assert!(matches!(core.get_patient("1".into()), Err(PatientRecordsError::Forbidden(_))));
        assert!(matches!(
            core.check_ins_for_patient("1".into()),
            Err(PatientRecordsError::Forbidden(_))
        ));
        assert!(matches!(
            core.patient_documents("1".into()),
            Err(PatientRecordsError::Forbidden(_))
        ));
        // Their own record stays reachable
        assert_eq!(core.patient_portal().unwrap().patient.first_name, "Pat");
    }

    #[test]
    fn test_staff_record_reads() {
        let core = signed_in("nurse@hospital.com", "nurse123");
        assert_eq!(core.list_users().unwrap().len(), 3);
        assert_eq!(core.get_patient("2".into()).unwrap().unwrap().case_number, "002-B");
        assert!(core.get_patient("99".into()).unwrap().is_none());
        assert!(core.patient_documents("1".into()).unwrap().is_empty());
    }

    #[test]
    fn test_search_patients() {
        let core = signed_in("admin@hospital.com", "admin123");
        let hits = core.search_patients("davis".into()).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].case_number, "002-B");
    }
}
