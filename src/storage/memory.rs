//! In-memory store, used by tests

use std::collections::HashMap;
use std::sync::RwLock;

use super::{Collection, CollectionData, LedgerStore};
use crate::error::{LedgerError, LedgerResult};

#[derive(Default)]
pub struct MemoryLedgerStore {
    data: RwLock<HashMap<Collection, CollectionData>>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn load_collection(&self, collection: Collection) -> LedgerResult<CollectionData> {
        let data = self.data.read().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data
            .get(&collection)
            .cloned()
            .unwrap_or_else(|| collection.empty()))
    }

    fn save_collection(&self, collection_data: &CollectionData) -> LedgerResult<()> {
        let mut data = self.data.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(collection_data.collection(), collection_data.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Account;

    #[test]
    fn test_unsaved_collection_is_empty() {
        let store = MemoryLedgerStore::new();
        let data = store.load_collection(Collection::RepeatingEntries).unwrap();
        assert_eq!(data, CollectionData::RepeatingEntries(Vec::new()));
    }

    #[test]
    fn test_save_replaces_collection() {
        let store = MemoryLedgerStore::new();
        store
            .save_collection(&CollectionData::Accounts(vec![Account::expense("A", "")]))
            .unwrap();
        store
            .save_collection(&CollectionData::Accounts(vec![Account::expense("B", "")]))
            .unwrap();

        let loaded = store.load_collection(Collection::Accounts).unwrap();
        assert_eq!(loaded, CollectionData::Accounts(vec![Account::expense("B", "")]));
    }
}
