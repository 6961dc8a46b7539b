//! Check-in collection operations.

use super::{keys, Record, RecordStore, StoreResult};
use crate::models::{new_record_id, CheckIn, NewCheckIn};
use crate::storage::KeyValueStorage;

impl Record for CheckIn {
    const COLLECTION: &'static str = keys::CHECK_INS;

    fn id(&self) -> &str {
        &self.id
    }
}

impl<S: KeyValueStorage> RecordStore<S> {
    pub fn get_check_ins(&self) -> StoreResult<Vec<CheckIn>> {
        self.get_all()
    }

    pub fn get_check_in_by_id(&self, id: &str) -> StoreResult<Option<CheckIn>> {
        self.get_by_id(id)
    }

    /// Check-ins for one patient, oldest first.
    pub fn get_check_ins_by_patient(&self, patient_id: &str) -> StoreResult<Vec<CheckIn>> {
        self.filter(|c: &CheckIn| c.patient_id == patient_id)
    }

    /// Record a check-in stamped with the current time.
    pub fn create_check_in(&mut self, check_in: NewCheckIn) -> StoreResult<CheckIn> {
        self.append(check_in.into_check_in(new_record_id()))
    }
}
