//! Stand-in for a missing storage area.

use super::{KeyValueStorage, StorageError, StorageResult};

/// Reads see nothing, writes fail with [`StorageError::Unavailable`].
///
/// Models running the store where no storage area is attached, so readers
/// observe empty collections instead of errors.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedStorage;

impl KeyValueStorage for DetachedStorage {
    fn is_available(&self) -> bool {
        false
    }

    fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
        Ok(None)
    }

    fn set_item(&mut self, key: &str, _value: &str) -> StorageResult<()> {
        tracing::warn!(key, "write to detached storage rejected");
        Err(StorageError::Unavailable)
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        tracing::warn!(key, "remove on detached storage rejected");
        Err(StorageError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_empty_writes_fail() {
        let mut storage = DetachedStorage;
        assert!(!storage.is_available());
        assert_eq!(storage.get_item("patients").unwrap(), None);
        assert!(matches!(
            storage.set_item("patients", "[]"),
            Err(StorageError::Unavailable)
        ));
    }
}
