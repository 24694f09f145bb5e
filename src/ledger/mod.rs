//! The ledger aggregate
//!
//! [`Ledger`] owns the account registry, the entry store, the default budget
//! and one budget per opened month. Every mutation goes through here so the
//! cross-component rules hold: entries must reference registered accounts,
//! recording an entry makes sure its month has a budget, and an opened
//! month starts from a copy of the default budget.

pub mod entries;
pub mod reconcile;
pub mod registry;

pub use entries::{EntryStore, KeyedEntries, KeyedEntry, SingleEntries};
pub use reconcile::{reconcile, AccountReconciliation, MonthlyReport};
pub use registry::AccountRegistry;

use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Account, Budget, BudgetLine, InstallmentEntry, Money, MonthRange, RepeatingEntry,
    SingleEntry, YearMonth,
};

/// A personal finance ledger
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    registry: AccountRegistry,
    entries: EntryStore,
    default_budget: Budget,
    monthly_budgets: BTreeMap<YearMonth, Budget>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    // Accounts

    /// Register an account, optionally adding it to the default budget
    ///
    /// The default budget amount is checked first, so a rejected amount
    /// leaves the registry untouched.
    pub fn register_account(
        &mut self,
        name: &str,
        description: &str,
        is_expense: bool,
        is_budgeted: bool,
        default_amount: Option<Money>,
    ) -> LedgerResult<Account> {
        let account = Account::new(name, description, is_expense, is_budgeted);

        if let Some(amount) = default_amount {
            Budget::check_magnitude(amount)?;
            if !is_budgeted && !amount.is_zero() {
                return Err(LedgerError::InvalidAmount {
                    account: account.name,
                    amount,
                });
            }
            if self.default_budget.is_present(name) {
                return Err(LedgerError::DuplicateAccount(account.name));
            }
        }

        self.registry.insert(account.clone())?;
        if let Some(amount) = default_amount {
            self.default_budget.add_account(&account, amount)?;
        }

        debug!(account = %account.name, is_expense, is_budgeted, "registered account");
        Ok(account)
    }

    /// Remove an account and its default budget line
    ///
    /// Monthly budgets and entries that name the account are kept.
    pub fn remove_account(&mut self, name: &str) -> LedgerResult<Account> {
        let account = self.registry.remove(name)?;
        if self.default_budget.is_present(name) {
            self.default_budget.delete_account(name)?;
        }

        debug!(account = %name, "removed account");
        Ok(account)
    }

    pub fn update_account(
        &mut self,
        name: &str,
        description: &str,
        is_expense: bool,
        is_budgeted: bool,
    ) -> LedgerResult<Account> {
        let account = self
            .registry
            .update(name, description, is_expense, is_budgeted)?;
        debug!(account = %name, is_expense, is_budgeted, "updated account");
        Ok(account)
    }

    pub fn find_account(&self, name: &str) -> Option<&Account> {
        self.registry.find_by_name(name)
    }

    pub fn accounts(&self) -> &[Account] {
        self.registry.list()
    }

    fn account(&self, name: &str) -> LedgerResult<Account> {
        self.registry.get(name).cloned()
    }

    // Months

    /// Open a month's budget as a copy of the current default budget
    pub fn open_month(&mut self, month: YearMonth) -> LedgerResult<&Budget> {
        if self.monthly_budgets.contains_key(&month) {
            return Err(LedgerError::DuplicateMonth(month));
        }

        let seed = self.default_budget.clone();
        debug!(%month, lines = seed.len(), "opened month");
        Ok(self.monthly_budgets.entry(month).or_insert(seed))
    }

    /// The month's budget, created empty if missing
    pub fn ensure_month(&mut self, month: YearMonth) -> &Budget {
        self.monthly_budget_mut(month)
    }

    fn monthly_budget_mut(&mut self, month: YearMonth) -> &mut Budget {
        self.monthly_budgets.entry(month).or_insert_with(|| {
            debug!(%month, "created empty month budget");
            Budget::new()
        })
    }

    pub fn monthly_budget(&self, month: YearMonth) -> Option<&Budget> {
        self.monthly_budgets.get(&month)
    }

    /// Months that have a budget, ascending
    pub fn months(&self) -> impl Iterator<Item = YearMonth> + '_ {
        self.monthly_budgets.keys().copied()
    }

    // Single entries

    /// Record a dated transaction against an account
    pub fn record_single_entry(
        &mut self,
        date: NaiveDate,
        description: &str,
        account_name: &str,
        magnitude: Money,
    ) -> LedgerResult<SingleEntry> {
        let account = self.account(account_name)?;
        let entry = SingleEntry::new(date, &account, description, magnitude)?;
        self.insert_single_entry(entry.clone())?;
        Ok(entry)
    }

    /// Insert an entry whose amount is already signed
    pub fn insert_single_entry(&mut self, entry: SingleEntry) -> LedgerResult<()> {
        self.account(entry.account())?;
        self.monthly_budget_mut(entry.month());

        debug!(date = %entry.date, account = entry.account(), amount = %entry.amount(), "recorded entry");
        self.entries.single.add(entry);
        Ok(())
    }

    pub fn delete_single_entry(&mut self, date: NaiveDate, index: usize) -> LedgerResult<SingleEntry> {
        let removed = self.entries.single.delete_at(date, index)?;
        debug!(%date, index, "deleted entry");
        Ok(removed)
    }

    /// Replace an entry, returning the one it replaced
    pub fn update_single_entry(
        &mut self,
        old_date: NaiveDate,
        old_index: usize,
        date: NaiveDate,
        description: &str,
        account_name: &str,
        magnitude: Money,
    ) -> LedgerResult<SingleEntry> {
        let account = self.account(account_name)?;
        let entry = SingleEntry::new(date, &account, description, magnitude)?;
        let month = entry.month();

        let old = self.entries.single.update(old_date, old_index, entry)?;
        self.monthly_budget_mut(month);

        debug!(%old_date, old_index, %date, "updated entry");
        Ok(old)
    }

    pub fn get_single_entry(&self, date: NaiveDate, index: usize) -> Option<&SingleEntry> {
        self.entries.single.get(date, index)
    }

    pub fn single_entry_count(&self, date: NaiveDate) -> usize {
        self.entries.single.count_for_date(date)
    }

    pub fn single_entries(&self) -> &SingleEntries {
        &self.entries.single
    }

    /// Sum of an account's single entries over an inclusive date range
    pub fn total_for_account(
        &self,
        account_name: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> LedgerResult<Money> {
        self.registry.get(account_name)?;
        Ok(self.entries.single.total_for_account(account_name, start, end))
    }

    // Repeating entries

    pub fn record_repeating_entry(
        &mut self,
        months: MonthRange,
        description: &str,
        account_name: &str,
        monthly_magnitude: Money,
    ) -> LedgerResult<RepeatingEntry> {
        let account = self.account(account_name)?;
        let entry = RepeatingEntry::new(months, &account, description, monthly_magnitude)?;
        self.insert_repeating_entry(entry.clone())?;
        Ok(entry)
    }

    pub fn insert_repeating_entry(&mut self, entry: RepeatingEntry) -> LedgerResult<()> {
        self.account(entry.account())?;
        debug!(description = entry.description(), months = %entry.months, "recorded repeating entry");
        self.entries.repeating.add(entry)
    }

    pub fn delete_repeating_entry(&mut self, description: &str) -> LedgerResult<RepeatingEntry> {
        let removed = self.entries.repeating.delete(description)?;
        debug!(description, "deleted repeating entry");
        Ok(removed)
    }

    pub fn get_repeating_entry(&self, description: &str) -> Option<&RepeatingEntry> {
        self.entries.repeating.get(description)
    }

    /// Repeating entries covering `month`, or all of them
    pub fn repeating_entries(&self, month: Option<YearMonth>) -> Vec<&RepeatingEntry> {
        self.entries.repeating.list_for_month(month)
    }

    // Installment entries

    pub fn record_installment_entry(
        &mut self,
        months: MonthRange,
        description: &str,
        account_name: &str,
        total_magnitude: Money,
    ) -> LedgerResult<InstallmentEntry> {
        let account = self.account(account_name)?;
        let entry = InstallmentEntry::new(months, &account, description, total_magnitude)?;
        self.insert_installment_entry(entry.clone())?;
        Ok(entry)
    }

    pub fn insert_installment_entry(&mut self, entry: InstallmentEntry) -> LedgerResult<()> {
        self.account(entry.account())?;
        debug!(description = entry.description(), months = %entry.months, "recorded installment entry");
        self.entries.installments.add(entry)
    }

    pub fn delete_installment_entry(&mut self, description: &str) -> LedgerResult<InstallmentEntry> {
        let removed = self.entries.installments.delete(description)?;
        debug!(description, "deleted installment entry");
        Ok(removed)
    }

    pub fn get_installment_entry(&self, description: &str) -> Option<&InstallmentEntry> {
        self.entries.installments.get(description)
    }

    /// Installments with a payment due in `month`, or all of them
    pub fn installment_entries(&self, month: Option<YearMonth>) -> Vec<&InstallmentEntry> {
        self.entries.installments.list_for_month(month)
    }

    pub fn entries(&self) -> &EntryStore {
        &self.entries
    }

    // Default budget

    pub fn default_budget(&self) -> &Budget {
        &self.default_budget
    }

    pub fn add_default_budget_account(&mut self, account_name: &str, amount: Money) -> LedgerResult<()> {
        let account = self.account(account_name)?;
        self.default_budget.add_account(&account, amount)?;
        debug!(account = account_name, %amount, "added default budget line");
        Ok(())
    }

    pub fn remove_default_budget_account(&mut self, account_name: &str) -> LedgerResult<BudgetLine> {
        let line = self.default_budget.delete_account(account_name)?;
        debug!(account = account_name, "removed default budget line");
        Ok(line)
    }

    /// Change a default budget amount, returning the previous one
    pub fn update_default_budget_amount(
        &mut self,
        account_name: &str,
        amount: Money,
    ) -> LedgerResult<Money> {
        let account = self.account(account_name)?;
        let previous = self.default_budget.update_amount(&account, amount)?;
        debug!(account = account_name, %previous, %amount, "updated default budget line");
        Ok(previous)
    }

    pub fn default_budget_amount(&self, account_name: &str) -> LedgerResult<Money> {
        let account = self.registry.get(account_name)?;
        self.default_budget.get_amount(account)
    }

    // Monthly budgets

    /// Add a line to a month's budget, creating the budget if needed
    pub fn add_monthly_budget_account(
        &mut self,
        month: YearMonth,
        account_name: &str,
        amount: Money,
    ) -> LedgerResult<()> {
        let account = self.account(account_name)?;
        self.monthly_budget_mut(month).add_account(&account, amount)?;
        debug!(%month, account = account_name, %amount, "added month budget line");
        Ok(())
    }

    pub fn remove_monthly_budget_account(
        &mut self,
        month: YearMonth,
        account_name: &str,
    ) -> LedgerResult<BudgetLine> {
        let line = self
            .monthly_budgets
            .get_mut(&month)
            .ok_or_else(|| LedgerError::month_not_found(month))?
            .delete_account(account_name)?;
        debug!(%month, account = account_name, "removed month budget line");
        Ok(line)
    }

    /// Change a month's budget amount, returning the previous one
    pub fn update_monthly_budget_amount(
        &mut self,
        month: YearMonth,
        account_name: &str,
        amount: Money,
    ) -> LedgerResult<Money> {
        let account = self.account(account_name)?;
        let previous = self
            .monthly_budgets
            .get_mut(&month)
            .ok_or_else(|| LedgerError::month_not_found(month))?
            .update_amount(&account, amount)?;
        debug!(%month, account = account_name, %previous, %amount, "updated month budget line");
        Ok(previous)
    }

    pub fn monthly_budget_amount(&self, month: YearMonth, account_name: &str) -> LedgerResult<Money> {
        let budget = self
            .monthly_budget(month)
            .ok_or_else(|| LedgerError::month_not_found(month))?;
        budget.get_amount(self.registry.get(account_name)?)
    }

    // Restoring saved records
    //
    // Saved records are put back as they were written. They may name
    // accounts removed since, or carry amounts for accounts that have since
    // stopped being budgeted; both are left dangling, exactly as before the
    // save. Only each collection's own keys are checked.

    pub fn restore_single_entry(&mut self, entry: SingleEntry) {
        self.entries.single.add(entry);
    }

    pub fn restore_repeating_entry(&mut self, entry: RepeatingEntry) -> LedgerResult<()> {
        self.entries.repeating.add(entry)
    }

    pub fn restore_installment_entry(&mut self, entry: InstallmentEntry) -> LedgerResult<()> {
        self.entries.installments.add(entry)
    }

    pub fn restore_monthly_budget_line(
        &mut self,
        month: YearMonth,
        line: BudgetLine,
    ) -> LedgerResult<()> {
        self.monthly_budget_mut(month).restore_line(line)
    }

    pub fn restore_default_budget_line(&mut self, line: BudgetLine) -> LedgerResult<()> {
        self.default_budget.restore_line(line)
    }

    // Reporting

    /// Actual versus budget for every registered account in `month`
    pub fn reconcile(&self, month: YearMonth) -> MonthlyReport {
        reconcile(
            &self.registry,
            &self.entries,
            self.monthly_budget(month),
            month,
        )
    }
}
