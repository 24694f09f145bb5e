//! Account registry
//!
//! Holds account definitions in insertion order. Names are unique and
//! case-sensitive.

use crate::error::{LedgerError, LedgerResult};
use crate::models::Account;

#[derive(Debug, Clone, Default)]
pub struct AccountRegistry {
    accounts: Vec<Account>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new account
    pub fn register(
        &mut self,
        name: &str,
        description: &str,
        is_expense: bool,
        is_budgeted: bool,
    ) -> LedgerResult<Account> {
        let account = Account::new(name, description, is_expense, is_budgeted);
        self.insert(account.clone())?;
        Ok(account)
    }

    /// Insert an already built account
    pub fn insert(&mut self, account: Account) -> LedgerResult<()> {
        account
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        if self.contains(&account.name) {
            return Err(LedgerError::DuplicateAccount(account.name));
        }

        self.accounts.push(account);
        Ok(())
    }

    /// Remove an account by name
    pub fn remove(&mut self, name: &str) -> LedgerResult<Account> {
        let index = self
            .accounts
            .iter()
            .position(|a| a.name == name)
            .ok_or_else(|| LedgerError::account_not_found(name))?;
        Ok(self.accounts.remove(index))
    }

    /// Change an account's description and flags in place
    ///
    /// Entries already recorded keep the sign they were stored with.
    pub fn update(
        &mut self,
        name: &str,
        description: &str,
        is_expense: bool,
        is_budgeted: bool,
    ) -> LedgerResult<Account> {
        let account = self
            .accounts
            .iter_mut()
            .find(|a| a.name == name)
            .ok_or_else(|| LedgerError::account_not_found(name))?;

        account.description = description.to_string();
        account.is_expense = is_expense;
        account.is_budgeted = is_budgeted;
        Ok(account.clone())
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.name == name)
    }

    /// Like `find_by_name`, but absence is an error
    pub fn get(&self, name: &str) -> LedgerResult<&Account> {
        self.find_by_name(name)
            .ok_or_else(|| LedgerError::account_not_found(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find_by_name(name).is_some()
    }

    pub fn list(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
