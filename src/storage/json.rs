//! JSON file store
//!
//! One pretty-printed JSON array per collection under the data directory.

use std::path::PathBuf;

use super::file_io::{read_json, write_json_atomic};
use super::{Collection, CollectionData, LedgerStore};
use crate::config::paths::LedgerPaths;
use crate::error::LedgerResult;

pub struct JsonLedgerStore {
    paths: LedgerPaths,
}

impl JsonLedgerStore {
    pub fn new(paths: LedgerPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    pub fn path_for(&self, collection: Collection) -> PathBuf {
        match collection {
            Collection::Accounts => self.paths.accounts_file(),
            Collection::SingleEntries => self.paths.entries_file(),
            Collection::RepeatingEntries => self.paths.repeating_file(),
            Collection::InstallmentEntries => self.paths.installments_file(),
            Collection::MonthlyBudgets => self.paths.budgets_file(),
            Collection::DefaultBudget => self.paths.default_budget_file(),
        }
    }
}

impl LedgerStore for JsonLedgerStore {
    fn load_collection(&self, collection: Collection) -> LedgerResult<CollectionData> {
        let path = self.path_for(collection);
        Ok(match collection {
            Collection::Accounts => CollectionData::Accounts(read_json(path)?),
            Collection::SingleEntries => CollectionData::SingleEntries(read_json(path)?),
            Collection::RepeatingEntries => CollectionData::RepeatingEntries(read_json(path)?),
            Collection::InstallmentEntries => {
                CollectionData::InstallmentEntries(read_json(path)?)
            }
            Collection::MonthlyBudgets => CollectionData::MonthlyBudgets(read_json(path)?),
            Collection::DefaultBudget => CollectionData::DefaultBudget(read_json(path)?),
        })
    }

    fn save_collection(&self, data: &CollectionData) -> LedgerResult<()> {
        let path = self.path_for(data.collection());
        match data {
            CollectionData::Accounts(records) => write_json_atomic(path, records),
            CollectionData::SingleEntries(records) => write_json_atomic(path, records),
            CollectionData::RepeatingEntries(records) => write_json_atomic(path, records),
            CollectionData::InstallmentEntries(records) => write_json_atomic(path, records),
            CollectionData::MonthlyBudgets(records) => write_json_atomic(path, records),
            CollectionData::DefaultBudget(records) => write_json_atomic(path, records),
        }
    }
}
