//! Persistence port for the ledger
//!
//! The ledger itself holds no connection. A [`LedgerStore`] loads and saves
//! whole collections, and [`load_ledger`] / [`save_ledger`] move a
//! [`Ledger`] through it. Accounts are replayed through registration;
//! entries and budget lines are restored as saved, so references to
//! accounts removed since survive a reload. Records that break a
//! collection's own rules (duplicate keys, invalid accounts, negative
//! budget amounts) are skipped, logged and listed in the [`LoadReport`].

pub mod file_io;
pub mod json;
pub mod memory;

pub use file_io::{read_json, write_json_atomic};
pub use json::JsonLedgerStore;
pub use memory::MemoryLedgerStore;

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::{Account, BudgetLine, InstallmentEntry, RepeatingEntry, SingleEntry, YearMonth};

/// The persisted collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Accounts,
    SingleEntries,
    RepeatingEntries,
    InstallmentEntries,
    MonthlyBudgets,
    DefaultBudget,
}

impl Collection {
    /// Dependency order: accounts before anything that refers to them
    pub const LOAD_ORDER: [Collection; 6] = [
        Collection::Accounts,
        Collection::SingleEntries,
        Collection::RepeatingEntries,
        Collection::InstallmentEntries,
        Collection::MonthlyBudgets,
        Collection::DefaultBudget,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Accounts => "accounts",
            Collection::SingleEntries => "single entries",
            Collection::RepeatingEntries => "repeating entries",
            Collection::InstallmentEntries => "installment entries",
            Collection::MonthlyBudgets => "monthly budgets",
            Collection::DefaultBudget => "default budget",
        }
    }

    /// An empty collection of this kind
    pub fn empty(&self) -> CollectionData {
        match self {
            Collection::Accounts => CollectionData::Accounts(Vec::new()),
            Collection::SingleEntries => CollectionData::SingleEntries(Vec::new()),
            Collection::RepeatingEntries => CollectionData::RepeatingEntries(Vec::new()),
            Collection::InstallmentEntries => CollectionData::InstallmentEntries(Vec::new()),
            Collection::MonthlyBudgets => CollectionData::MonthlyBudgets(Vec::new()),
            Collection::DefaultBudget => CollectionData::DefaultBudget(Vec::new()),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One month's budget as stored
///
/// Months with no lines are still stored so an opened month survives a
/// reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBudgetRecord {
    pub month: YearMonth,
    #[serde(default)]
    pub lines: Vec<BudgetLine>,
}

/// The records of one collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionData {
    Accounts(Vec<Account>),
    SingleEntries(Vec<SingleEntry>),
    RepeatingEntries(Vec<RepeatingEntry>),
    InstallmentEntries(Vec<InstallmentEntry>),
    MonthlyBudgets(Vec<MonthlyBudgetRecord>),
    DefaultBudget(Vec<BudgetLine>),
}

impl CollectionData {
    pub fn collection(&self) -> Collection {
        match self {
            CollectionData::Accounts(_) => Collection::Accounts,
            CollectionData::SingleEntries(_) => Collection::SingleEntries,
            CollectionData::RepeatingEntries(_) => Collection::RepeatingEntries,
            CollectionData::InstallmentEntries(_) => Collection::InstallmentEntries,
            CollectionData::MonthlyBudgets(_) => Collection::MonthlyBudgets,
            CollectionData::DefaultBudget(_) => Collection::DefaultBudget,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CollectionData::Accounts(v) => v.len(),
            CollectionData::SingleEntries(v) => v.len(),
            CollectionData::RepeatingEntries(v) => v.len(),
            CollectionData::InstallmentEntries(v) => v.len(),
            CollectionData::MonthlyBudgets(v) => v.len(),
            CollectionData::DefaultBudget(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Loads and saves whole collections
pub trait LedgerStore {
    fn load_collection(&self, collection: Collection) -> LedgerResult<CollectionData>;

    fn save_collection(&self, data: &CollectionData) -> LedgerResult<()>;
}

/// A record that failed validation during load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub collection: Collection,
    pub record: String,
    pub reason: String,
}

/// Outcome of [`load_ledger`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedRecord>,
}

impl LoadReport {
    fn record(&mut self, collection: Collection, record: String, result: LedgerResult<()>) {
        match result {
            Ok(()) => self.loaded += 1,
            Err(err) => {
                warn!(%collection, %record, error = %err, "skipping invalid record");
                self.skipped.push(SkippedRecord {
                    collection,
                    record,
                    reason: err.to_string(),
                });
            }
        }
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

fn mismatch(expected: Collection, got: &CollectionData) -> LedgerError {
    LedgerError::Storage(format!(
        "Store returned {} when asked for {}",
        got.collection(),
        expected
    ))
}

/// Build a ledger from everything in `store`
pub fn load_ledger<S: LedgerStore + ?Sized>(store: &S) -> LedgerResult<(Ledger, LoadReport)> {
    let mut ledger = Ledger::new();
    let mut report = LoadReport::default();

    for collection in Collection::LOAD_ORDER {
        let data = store.load_collection(collection)?;
        if data.collection() != collection {
            return Err(mismatch(collection, &data));
        }
        replay(&mut ledger, &mut report, data);
    }

    info!(
        loaded = report.loaded,
        skipped = report.skipped.len(),
        "loaded ledger"
    );
    Ok((ledger, report))
}

fn replay(ledger: &mut Ledger, report: &mut LoadReport, data: CollectionData) {
    let collection = data.collection();
    match data {
        CollectionData::Accounts(accounts) => {
            for a in accounts {
                let result = ledger
                    .register_account(&a.name, &a.description, a.is_expense, a.is_budgeted, None)
                    .map(|_| ());
                report.record(collection, a.name, result);
            }
        }
        CollectionData::SingleEntries(entries) => {
            for entry in entries {
                let label = format!("{} {}", entry.date, entry.description());
                ledger.restore_single_entry(entry);
                report.record(collection, label, Ok(()));
            }
        }
        CollectionData::RepeatingEntries(entries) => {
            for entry in entries {
                let label = entry.description().to_string();
                report.record(collection, label, ledger.restore_repeating_entry(entry));
            }
        }
        CollectionData::InstallmentEntries(entries) => {
            for entry in entries {
                let label = entry.description().to_string();
                report.record(collection, label, ledger.restore_installment_entry(entry));
            }
        }
        CollectionData::MonthlyBudgets(months) => {
            for record in months {
                ledger.ensure_month(record.month);
                for line in record.lines {
                    let label = format!("{} {}", record.month, line.account);
                    let result = ledger.restore_monthly_budget_line(record.month, line);
                    report.record(collection, label, result);
                }
            }
        }
        CollectionData::DefaultBudget(lines) => {
            for line in lines {
                let label = line.account.clone();
                report.record(collection, label, ledger.restore_default_budget_line(line));
            }
        }
    }
}

/// Snapshot every collection of `ledger`
pub fn snapshot(ledger: &Ledger) -> Vec<CollectionData> {
    let monthly = ledger
        .months()
        .filter_map(|month| {
            ledger.monthly_budget(month).map(|budget| MonthlyBudgetRecord {
                month,
                lines: budget.iter().cloned().collect(),
            })
        })
        .collect();

    vec![
        CollectionData::Accounts(ledger.accounts().to_vec()),
        CollectionData::SingleEntries(ledger.single_entries().list_all().cloned().collect()),
        CollectionData::RepeatingEntries(
            ledger.repeating_entries(None).into_iter().cloned().collect(),
        ),
        CollectionData::InstallmentEntries(
            ledger.installment_entries(None).into_iter().cloned().collect(),
        ),
        CollectionData::MonthlyBudgets(monthly),
        CollectionData::DefaultBudget(ledger.default_budget().iter().cloned().collect()),
    ]
}

/// Write every collection of `ledger` to `store`
pub fn save_ledger<S: LedgerStore + ?Sized>(store: &S, ledger: &Ledger) -> LedgerResult<()> {
    let mut written = 0;
    for data in snapshot(ledger) {
        written += data.len();
        store.save_collection(&data)?;
    }

    info!(records = written, "saved ledger");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, MonthRange};
    use chrono::NaiveDate;

    fn ym(y: i32, m: u32) -> YearMonth {
        YearMonth::new(y, m).unwrap()
    }

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger
            .register_account("Payroll", "salary", false, true, Some(Money::from_cents(300000)))
            .unwrap();
        ledger
            .register_account("Food", "groceries", true, true, Some(Money::from_cents(20000)))
            .unwrap();
        ledger
            .register_account("Transfers", "", true, false, Some(Money::zero()))
            .unwrap();

        ledger.open_month(ym(2024, 6)).unwrap();
        ledger.open_month(ym(2024, 7)).unwrap();
        ledger
            .update_monthly_budget_amount(ym(2024, 7), "Food", Money::from_cents(25000))
            .unwrap();

        let day = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        ledger
            .record_single_entry(day, "Groceries", "Food", Money::from_cents(5000))
            .unwrap();
        ledger
            .record_single_entry(day, "Paycheck", "Payroll", Money::from_cents(300000))
            .unwrap();
        ledger
            .record_repeating_entry(
                MonthRange::new(ym(2024, 1), ym(2024, 12)).unwrap(),
                "Meal kit",
                "Food",
                Money::from_cents(2000),
            )
            .unwrap();
        ledger
            .record_installment_entry(
                MonthRange::new(ym(2024, 6), ym(2024, 9)).unwrap(),
                "Freezer",
                "Food",
                Money::from_cents(60000),
            )
            .unwrap();
        ledger
    }

    #[test]
    fn test_load_order_starts_with_accounts() {
        assert_eq!(Collection::LOAD_ORDER[0], Collection::Accounts);
        assert_eq!(Collection::LOAD_ORDER.len(), 6);
    }

    #[test]
    fn test_round_trip_through_memory_store() {
        let ledger = sample_ledger();
        let store = MemoryLedgerStore::new();
        save_ledger(&store, &ledger).unwrap();

        let (loaded, report) = load_ledger(&store).unwrap();
        assert!(report.is_clean());
        assert_eq!(snapshot(&loaded), snapshot(&ledger));
        assert_eq!(loaded.reconcile(ym(2024, 6)), ledger.reconcile(ym(2024, 6)));
    }

    #[test]
    fn test_opened_month_keeps_its_own_copy_after_reload() {
        let mut ledger = sample_ledger();
        ledger
            .update_default_budget_amount("Food", Money::from_cents(1))
            .unwrap();

        let store = MemoryLedgerStore::new();
        save_ledger(&store, &ledger).unwrap();
        let (loaded, _) = load_ledger(&store).unwrap();

        assert_eq!(loaded.default_budget_amount("Food").unwrap().cents(), 1);
        assert_eq!(
            loaded.monthly_budget_amount(ym(2024, 6), "Food").unwrap().cents(),
            20000
        );
        assert_eq!(
            loaded.monthly_budget_amount(ym(2024, 7), "Food").unwrap().cents(),
            25000
        );
    }

    #[test]
    fn test_empty_opened_month_survives_reload() {
        let mut ledger = Ledger::new();
        ledger.open_month(ym(2025, 1)).unwrap();

        let store = MemoryLedgerStore::new();
        save_ledger(&store, &ledger).unwrap();
        let (loaded, _) = load_ledger(&store).unwrap();

        assert!(loaded.monthly_budget(ym(2025, 1)).unwrap().is_empty());
    }

    #[test]
    fn test_removed_account_records_survive_reloads() {
        let mut ledger = sample_ledger();
        ledger.remove_account("Food").unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();

        let store = MemoryLedgerStore::new();
        save_ledger(&store, &ledger).unwrap();
        let (loaded, report) = load_ledger(&store).unwrap();
        assert!(report.is_clean());
        assert_eq!(loaded.single_entry_count(day), 2);

        save_ledger(&store, &loaded).unwrap();
        let (reloaded, report) = load_ledger(&store).unwrap();
        assert!(report.is_clean());
        assert_eq!(snapshot(&reloaded), snapshot(&ledger));
        assert!(reloaded.get_installment_entry("Freezer").is_some());
        assert!(reloaded.monthly_budget(ym(2024, 7)).unwrap().is_present("Food"));
        assert!(reloaded.find_account("Food").is_none());
    }

    #[test]
    fn test_unbudgeted_account_keeps_its_lines_on_reload() {
        let mut ledger = sample_ledger();
        ledger
            .update_account("Food", "groceries", true, false)
            .unwrap();

        let store = MemoryLedgerStore::new();
        save_ledger(&store, &ledger).unwrap();
        let (loaded, report) = load_ledger(&store).unwrap();

        assert!(report.is_clean());
        assert_eq!(loaded.default_budget(), ledger.default_budget());
        assert_eq!(snapshot(&loaded), snapshot(&ledger));
        assert!(matches!(
            loaded.default_budget_amount("Food"),
            Err(LedgerError::NotBudgeted(_))
        ));
    }

    #[test]
    fn test_invalid_records_are_skipped() {
        let store = MemoryLedgerStore::new();
        let food = Account::expense("Food", "");
        let ghost = Account::expense("Ghost", "");
        let day = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        let range = MonthRange::new(ym(2024, 1), ym(2024, 2)).unwrap();
        let kit = RepeatingEntry::new(range, &food, "Meal kit", Money::from_cents(100)).unwrap();

        store
            .save_collection(&CollectionData::Accounts(vec![food.clone(), food.clone()]))
            .unwrap();
        store
            .save_collection(&CollectionData::SingleEntries(vec![
                SingleEntry::new(day, &food, "Groceries", Money::from_cents(100)).unwrap(),
                SingleEntry::new(day, &ghost, "Boo", Money::from_cents(100)).unwrap(),
            ]))
            .unwrap();
        store
            .save_collection(&CollectionData::RepeatingEntries(vec![kit.clone(), kit]))
            .unwrap();
        store
            .save_collection(&CollectionData::DefaultBudget(vec![BudgetLine {
                account: "Food".to_string(),
                amount: Money::from_cents(-500),
            }]))
            .unwrap();

        let (ledger, report) = load_ledger(&store).unwrap();
        assert_eq!(ledger.accounts().len(), 1);
        assert_eq!(ledger.single_entry_count(day), 2);
        assert_eq!(ledger.repeating_entries(None).len(), 1);
        assert!(ledger.default_budget().is_empty());
        assert_eq!(report.loaded, 4);

        let skipped: Vec<_> = report.skipped.iter().map(|s| s.collection).collect();
        assert_eq!(
            skipped,
            vec![
                Collection::Accounts,
                Collection::RepeatingEntries,
                Collection::DefaultBudget
            ]
        );
    }

    struct WrongStore;

    impl LedgerStore for WrongStore {
        fn load_collection(&self, _collection: Collection) -> LedgerResult<CollectionData> {
            Ok(CollectionData::DefaultBudget(Vec::new()))
        }

        fn save_collection(&self, _data: &CollectionData) -> LedgerResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_mismatched_collection_is_storage_error() {
        let err = load_ledger(&WrongStore).unwrap_err();
        assert!(matches!(err, LedgerError::Storage(_)));
    }
}
