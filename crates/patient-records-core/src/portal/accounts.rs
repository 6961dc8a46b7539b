//! Sign-up, log-in and log-out.

use super::{record_action, PortalError, PortalResult};
use crate::models::{actions, Gender, NewPatient, NewUser, Role, User};
use crate::store::RecordStore;
use crate::storage::KeyValueStorage;

/// Contact details a patient must give when creating an account.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientDetails {
    pub date_of_birth: String,
    pub phone: String,
    pub address: String,
}

impl PatientDetails {
    fn is_complete(&self) -> bool {
        !self.date_of_birth.is_empty() && !self.phone.is_empty() && !self.address.is_empty()
    }
}

/// A sign-up form submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SignUp {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
    /// Required when `role` is `Role::Patient`, ignored otherwise
    pub patient_details: Option<PatientDetails>,
}

/// Split a full name into first and last name.
///
/// The first space-separated word is the first name, the rest is the last
/// name; a single word is used for both.
pub fn split_full_name(full_name: &str) -> (String, String) {
    let mut parts = full_name.split(' ');
    let first = parts.next().unwrap_or_default().to_string();
    let rest = parts.collect::<Vec<_>>().join(" ");
    let last = if rest.is_empty() { first.clone() } else { rest };
    (first, last)
}

/// Create an account.
///
/// Patient accounts get a linked patient record with no care team. A
/// `SIGNUP` audit entry is written for every new account.
pub fn sign_up<S: KeyValueStorage>(store: &mut RecordStore<S>, form: SignUp) -> PortalResult<User> {
    if store.get_user_by_email(&form.email)?.is_some() {
        tracing::warn!("sign-up rejected: email already registered");
        return Err(PortalError::DuplicateEmail(form.email));
    }

    let patient_id = if form.role == Role::Patient {
        let details = form
            .patient_details
            .as_ref()
            .filter(|d| d.is_complete())
            .ok_or(PortalError::MissingPatientDetails)?;

        let (first_name, last_name) = split_full_name(&form.full_name);
        let patient = store.create_patient(NewPatient {
            first_name,
            last_name,
            date_of_birth: details.date_of_birth.clone(),
            gender: Gender::Other,
            blood_type: String::new(),
            phone: details.phone.clone(),
            email: form.email.clone(),
            address: details.address.clone(),
            medical_history: String::new(),
            allergies: String::new(),
            current_medications: String::new(),
            assigned_to: Vec::new(),
        })?;
        Some(patient.id)
    } else {
        None
    };

    let user = store.create_user(NewUser {
        email: form.email,
        full_name: form.full_name,
        role: form.role,
        patient_id,
        password: form.password,
    })?;

    record_action(
        store,
        &user,
        actions::SIGNUP,
        format!("New user {} registered as {}", user.full_name, user.role),
    )?;
    tracing::info!(user_id = %user.id, role = %user.role, "account created");
    Ok(user)
}

/// Check credentials, start a session and write a `LOGIN` audit entry.
pub fn log_in<S: KeyValueStorage>(
    store: &mut RecordStore<S>,
    email: &str,
    password: &str,
) -> PortalResult<User> {
    let user = store
        .get_user_by_email(email)?
        .ok_or_else(|| PortalError::UserNotFound(email.to_string()))?;

    if !user.password_matches(password) {
        tracing::warn!(user_id = %user.id, "log-in rejected: wrong password");
        return Err(PortalError::InvalidPassword);
    }

    store.set_current_user(&user.id)?;
    record_action(
        store,
        &user,
        actions::LOGIN,
        format!("User {} logged in", user.full_name),
    )?;
    tracing::info!(user_id = %user.id, "signed in");
    Ok(user)
}

/// End the current session.
pub fn log_out<S: KeyValueStorage>(store: &mut RecordStore<S>) -> PortalResult<()> {
    store.logout()?;
    Ok(())
}
