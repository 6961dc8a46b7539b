//! Patient document collection operations.

use super::{keys, Record, RecordStore, StoreResult};
use crate::models::{new_record_id, NewDocument, PatientDocument};
use crate::storage::KeyValueStorage;

impl Record for PatientDocument {
    const COLLECTION: &'static str = keys::PATIENT_DOCUMENTS;

    fn id(&self) -> &str {
        &self.id
    }
}

impl<S: KeyValueStorage> RecordStore<S> {
    pub fn get_all_documents(&self) -> StoreResult<Vec<PatientDocument>> {
        self.get_all()
    }

    pub fn get_document_by_id(&self, id: &str) -> StoreResult<Option<PatientDocument>> {
        self.get_by_id(id)
    }

    /// Documents attached to one patient, in upload order.
    pub fn get_patient_documents(&self, patient_id: &str) -> StoreResult<Vec<PatientDocument>> {
        self.filter(|d: &PatientDocument| d.patient_id == patient_id)
    }

    /// Attach document metadata; the file URL is a placeholder path.
    pub fn create_document(&mut self, document: NewDocument) -> StoreResult<PatientDocument> {
        self.append(document.into_document(new_record_id()))
    }

    /// Delete a document. Returns whether anything was removed.
    ///
    /// The remaining collection is written back either way.
    pub fn delete_document(&mut self, id: &str) -> StoreResult<bool> {
        let mut documents = self.get_all_documents()?;
        let before = documents.len();
        documents.retain(|d| d.id != id);
        self.write_collection(keys::PATIENT_DOCUMENTS, &documents)?;
        Ok(documents.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileType;
    use crate::storage::MemoryStorage;

    fn document(patient_id: &str, name: &str) -> NewDocument {
        NewDocument {
            patient_id: patient_id.into(),
            file_name: name.into(),
            file_type: FileType::LabResult,
            file_size: 1024,
            uploaded_by: "Dr. Sarah Johnson".into(),
            description: Some("Quarterly panel".into()),
            tags: Some(vec!["blood".into()]),
        }
    }

    #[test]
    fn test_delete_keeps_order_of_others() {
        let mut store = RecordStore::open(MemoryStorage::new()).unwrap();
        let a = store.create_document(document("1", "a.pdf")).unwrap();
        let b = store.create_document(document("1", "b.pdf")).unwrap();
        let other = store.create_document(document("2", "x.pdf")).unwrap();
        let c = store.create_document(document("1", "c.pdf")).unwrap();

        assert!(store.delete_document(&b.id).unwrap());

        let remaining: Vec<String> = store
            .get_patient_documents("1")
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(remaining, vec![a.id, c.id]);
        assert!(store.get_document_by_id(&other.id).unwrap().is_some());
    }

    #[test]
    fn test_delete_missing_document() {
        let mut store = RecordStore::open(MemoryStorage::new()).unwrap();
        store.create_document(document("1", "a.pdf")).unwrap();
        assert!(!store.delete_document("missing").unwrap());
        assert_eq!(store.get_all_documents().unwrap().len(), 1);
    }

    #[test]
    fn test_create_then_get_round_trips() {
        let mut store = RecordStore::open(MemoryStorage::new()).unwrap();
        let created = store.create_document(document("3", "scan.pdf")).unwrap();
        assert_eq!(created.file_url, "/documents/scan.pdf");
        assert_eq!(store.get_document_by_id(&created.id).unwrap(), Some(created));
    }
}
