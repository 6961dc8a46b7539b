//! Local record store.
//!
//! Each collection lives under one key as a JSON array and is re-read and
//! rewritten in full on every mutation. There is no locking and no
//! transaction spanning the read-modify-write cycle, so two processes
//! sharing a storage area can overwrite each other (last write wins).

mod audit;
mod case_number;
mod check_ins;
mod documents;
mod patients;
mod seed;
mod session;
mod users;

pub use case_number::{case_number_prefix, next_case_number};
pub use seed::{demo_patients, demo_users};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::storage::{KeyValueStorage, StorageError};

/// Storage keys.
pub mod keys {
    pub const USERS: &str = "users";
    pub const PATIENTS: &str = "patients";
    pub const CHECK_INS: &str = "checkIns";
    pub const AUDIT_LOGS: &str = "auditLogs";
    pub const PATIENT_DOCUMENTS: &str = "patientDocuments";
    pub const CURRENT_USER_ID: &str = "currentUserId";

    /// Every collection key, in initialization order.
    pub const COLLECTIONS: [&str; 5] = [USERS, PATIENTS, CHECK_INS, AUDIT_LOGS, PATIENT_DOCUMENTS];
}

/// Record store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// An entity persisted as one element of a keyed collection.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Storage key of the collection holding this record type.
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
}

/// Record store over an injected key/value backend.
pub struct RecordStore<S: KeyValueStorage> {
    storage: S,
}

impl<S: KeyValueStorage> RecordStore<S> {
    /// Open a store, seeding demo users and patients into a fresh area.
    pub fn open(storage: S) -> StoreResult<Self> {
        let mut store = Self { storage };
        store.initialize(true)?;
        Ok(store)
    }

    /// Open a store, creating missing collections empty.
    pub fn open_unseeded(storage: S) -> StoreResult<Self> {
        let mut store = Self { storage };
        store.initialize(false)?;
        Ok(store)
    }

    /// Get the backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give the backend back.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Full collection in insertion order. Empty when the key is absent.
    pub fn get_all<T: Record>(&self) -> StoreResult<Vec<T>> {
        self.read_collection(T::COLLECTION)
    }

    /// Linear scan for a record by id.
    pub fn get_by_id<T: Record>(&self, id: &str) -> StoreResult<Option<T>> {
        Ok(self.get_all::<T>()?.into_iter().find(|r| r.id() == id))
    }

    /// Records matching a predicate, order preserved.
    pub fn filter<T: Record>(&self, predicate: impl Fn(&T) -> bool) -> StoreResult<Vec<T>> {
        let mut records = self.get_all::<T>()?;
        records.retain(|r| predicate(r));
        Ok(records)
    }

    /// Append one record and persist the whole collection.
    fn append<T: Record>(&mut self, record: T) -> StoreResult<T> {
        let mut records = self.get_all::<T>()?;
        records.push(record.clone());
        self.write_collection(T::COLLECTION, &records)?;
        Ok(record)
    }

    fn read_collection<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Vec<T>> {
        match self.storage.get_item(key)? {
            Some(raw) => {
                let records: Vec<T> = serde_json::from_str(&raw)?;
                tracing::debug!(key, count = records.len(), "read collection");
                Ok(records)
            }
            None => Ok(Vec::new()),
        }
    }

    fn write_collection<T: Serialize>(&mut self, key: &str, records: &[T]) -> StoreResult<()> {
        let raw = serde_json::to_string(records)?;
        self.storage.set_item(key, &raw)?;
        tracing::debug!(key, count = records.len(), "wrote collection");
        Ok(())
    }

    /// Write missing collections. Existing keys are left alone.
    fn initialize(&mut self, with_demo_data: bool) -> StoreResult<()> {
        if !self.storage.is_available() {
            tracing::debug!("storage unavailable, skipping initialization");
            return Ok(());
        }

        for key in keys::COLLECTIONS {
            if self.storage.get_item(key)?.is_some() {
                continue;
            }
            match (key, with_demo_data) {
                (keys::USERS, true) => self.write_collection(key, &demo_users())?,
                (keys::PATIENTS, true) => self.write_collection(key, &demo_patients())?,
                _ => self.storage.set_item(key, "[]")?,
            }
            tracing::info!(key, "initialized collection");
        }
        Ok(())
    }
}
