//! Patient collection operations.

use super::{keys, next_case_number, Record, RecordStore, StoreResult};
use crate::models::{new_record_id, NewPatient, Patient, PatientUpdate};
use crate::storage::KeyValueStorage;

impl Record for Patient {
    const COLLECTION: &'static str = keys::PATIENTS;

    fn id(&self) -> &str {
        &self.id
    }
}

impl<S: KeyValueStorage> RecordStore<S> {
    /// List all patients in insertion order.
    pub fn get_patients(&self) -> StoreResult<Vec<Patient>> {
        self.get_all()
    }

    /// Get a patient by ID.
    pub fn get_patient_by_id(&self, id: &str) -> StoreResult<Option<Patient>> {
        self.get_by_id(id)
    }

    /// Patients whose care team includes `user_id`.
    pub fn get_patients_by_assigned_user(&self, user_id: &str) -> StoreResult<Vec<Patient>> {
        self.filter(|p: &Patient| p.is_assigned_to(user_id))
    }

    /// Create a patient with a freshly derived case number.
    pub fn create_patient(&mut self, patient: NewPatient) -> StoreResult<Patient> {
        let mut patients = self.get_patients()?;
        let case_number = next_case_number(&patients, &mut rand::thread_rng());
        let patient = patient.into_patient(new_record_id(), case_number);

        patients.push(patient.clone());
        self.write_collection(keys::PATIENTS, &patients)?;
        tracing::debug!(patient_id = %patient.id, case_number = %patient.case_number, "created patient");
        Ok(patient)
    }

    /// Merge `update` into the patient with `id`.
    ///
    /// Returns `None` without writing when no patient matches.
    pub fn update_patient(
        &mut self,
        id: &str,
        update: PatientUpdate,
    ) -> StoreResult<Option<Patient>> {
        let mut patients = self.get_patients()?;
        let Some(patient) = patients.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        update.apply_to(patient);
        let updated = patient.clone();
        self.write_collection(keys::PATIENTS, &patients)?;
        tracing::debug!(patient_id = %id, "updated patient");
        Ok(Some(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;
    use crate::store::case_number_prefix;
    use crate::storage::MemoryStorage;

    fn new_patient(first: &str, last: &str) -> NewPatient {
        NewPatient {
            first_name: first.into(),
            last_name: last.into(),
            date_of_birth: "2000-01-01".into(),
            gender: Gender::Other,
            blood_type: "AB+".into(),
            phone: "+1-555-0199".into(),
            email: format!("{}@email.com", first.to_lowercase()),
            address: "1 Test Way".into(),
            medical_history: String::new(),
            allergies: String::new(),
            current_medications: String::new(),
            assigned_to: vec!["2".into()],
        }
    }

    fn is_case_number(case: &str, prefix: &str) -> bool {
        case.len() == prefix.len() + 2
            && case.starts_with(prefix)
            && case.as_bytes()[prefix.len()] == b'-'
            && case.as_bytes()[prefix.len() + 1].is_ascii_uppercase()
    }

    #[test]
    fn test_case_numbers_from_empty_store() {
        let mut store = RecordStore::open_unseeded(MemoryStorage::new()).unwrap();

        let first = store.create_patient(new_patient("A", "B")).unwrap();
        assert!(is_case_number(&first.case_number, "001"), "{}", first.case_number);

        let second = store.create_patient(new_patient("C", "D")).unwrap();
        assert!(is_case_number(&second.case_number, "002"), "{}", second.case_number);
    }

    #[test]
    fn test_case_number_follows_seeded_patients() {
        let mut store = RecordStore::open(MemoryStorage::new()).unwrap();
        let patient = store.create_patient(new_patient("Ada", "Lovelace")).unwrap();
        assert_eq!(case_number_prefix(&patient.case_number), Some(4));
    }

    #[test]
    fn test_create_then_get_round_trips() {
        let mut store = RecordStore::open(MemoryStorage::new()).unwrap();
        let created = store.create_patient(new_patient("Ada", "Lovelace")).unwrap();
        let fetched = store.get_patient_by_id(&created.id).unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(created.created_at, created.updated_at);
    }

    #[test]
    fn test_update_patient() {
        let mut store = RecordStore::open(MemoryStorage::new()).unwrap();
        let before = store.get_patient_by_id("2").unwrap().unwrap();

        let updated = store
            .update_patient(
                "2",
                PatientUpdate {
                    phone: Some("+1-555-0177".into()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.phone, "+1-555-0177");
        assert_eq!(updated.last_name, before.last_name);
        assert_eq!(updated.case_number, before.case_number);
        assert!(updated.updated_at > before.updated_at);

        let stored = store.get_patient_by_id("2").unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[test]
    fn test_update_missing_patient() {
        let mut store = RecordStore::open(MemoryStorage::new()).unwrap();
        let result = store
            .update_patient("nope", PatientUpdate::default())
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_get_by_assigned_user() {
        let mut store = RecordStore::open(MemoryStorage::new()).unwrap();
        let mut unassigned = new_patient("Solo", "Case");
        unassigned.assigned_to = vec!["3".into()];
        let created = store.create_patient(unassigned).unwrap();

        let for_doctor: Vec<String> = store
            .get_patients_by_assigned_user("2")
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(for_doctor, vec!["1", "2", "3"]);

        let for_nurse = store.get_patients_by_assigned_user("3").unwrap();
        assert_eq!(for_nurse.len(), 4);
        assert_eq!(for_nurse[3].id, created.id);

        assert!(store.get_patients_by_assigned_user("1").unwrap().is_empty());
    }
}
