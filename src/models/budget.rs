//! Budget model
//!
//! A budget maps account names to amounts for one month, or serves as the
//! default template new months are seeded from. Lines keep insertion order.
//! Amounts are stored as the magnitude the user entered; reconciliation
//! applies the account's sign.

use serde::{Deserialize, Serialize};

use super::account::Account;
use super::money::Money;
use crate::error::{LedgerError, LedgerResult};

/// One account's amount within a budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub account: String,
    pub amount: Money,
}

/// An insertion-ordered account to amount mapping
///
/// Accounts that aren't budgeted may only appear with a zero amount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Budget {
    lines: Vec<BudgetLine>,
}

impl Budget {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, account_name: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.account == account_name)
    }

    /// Amounts are magnitudes; the account's sign is applied when reconciling
    pub(crate) fn check_magnitude(amount: Money) -> LedgerResult<()> {
        if amount.is_negative() {
            return Err(LedgerError::Validation(format!(
                "Budget amount must not be negative, got {}",
                amount
            )));
        }
        Ok(())
    }

    fn check_amount(account: &Account, amount: Money) -> LedgerResult<()> {
        Self::check_magnitude(amount)?;
        if !account.is_budgeted && !amount.is_zero() {
            return Err(LedgerError::InvalidAmount {
                account: account.name.clone(),
                amount,
            });
        }
        Ok(())
    }

    /// Add an account line
    ///
    /// A non-budgeted account is stored only as a zero placeholder.
    pub fn add_account(&mut self, account: &Account, amount: Money) -> LedgerResult<()> {
        if self.is_present(&account.name) {
            return Err(LedgerError::DuplicateAccount(account.name.clone()));
        }
        Self::check_amount(account, amount)?;

        self.lines.push(BudgetLine {
            account: account.name.clone(),
            amount,
        });
        Ok(())
    }

    /// Put back a stored line as it was saved
    ///
    /// The account may since have been removed or stopped being budgeted, so
    /// only the line's own shape is checked.
    pub fn restore_line(&mut self, line: BudgetLine) -> LedgerResult<()> {
        if self.is_present(&line.account) {
            return Err(LedgerError::DuplicateAccount(line.account));
        }
        Self::check_magnitude(line.amount)?;
        self.lines.push(line);
        Ok(())
    }

    /// Remove an account line
    pub fn delete_account(&mut self, account_name: &str) -> LedgerResult<BudgetLine> {
        let index = self
            .position(account_name)
            .ok_or_else(|| LedgerError::account_not_found(account_name))?;
        Ok(self.lines.remove(index))
    }

    /// Replace an account's amount, returning the previous one
    pub fn update_amount(&mut self, account: &Account, amount: Money) -> LedgerResult<Money> {
        let index = self
            .position(&account.name)
            .ok_or_else(|| LedgerError::account_not_found(&account.name))?;
        Self::check_amount(account, amount)?;

        let previous = self.lines[index].amount;
        self.lines[index].amount = amount;
        Ok(previous)
    }

    pub fn is_present(&self, account_name: &str) -> bool {
        self.position(account_name).is_some()
    }

    /// The stored amount for an account
    pub fn get_amount(&self, account: &Account) -> LedgerResult<Money> {
        let line = self
            .lines
            .iter()
            .find(|l| l.account == account.name)
            .ok_or_else(|| LedgerError::account_not_found(&account.name))?;

        if !account.is_budgeted {
            return Err(LedgerError::NotBudgeted(account.name.clone()));
        }
        Ok(line.amount)
    }

    /// Account names in insertion order
    pub fn list_accounts(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.account.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BudgetLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfers() -> Account {
        Account::new("Transfers", "", true, false)
    }

    #[test]
    fn test_add_and_get() {
        let food = Account::expense("Food", "");
        let mut budget = Budget::new();
        budget.add_account(&food, Money::from_cents(20000)).unwrap();

        assert!(budget.is_present("Food"));
        assert_eq!(budget.get_amount(&food).unwrap().cents(), 20000);
        assert_eq!(budget.len(), 1);
    }

    #[test]
    fn test_duplicate_account_rejected() {
        let food = Account::expense("Food", "");
        let mut budget = Budget::new();
        budget.add_account(&food, Money::from_cents(100)).unwrap();

        let err = budget.add_account(&food, Money::from_cents(200)).unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateAccount(name) if name == "Food"));
        assert_eq!(budget.get_amount(&food).unwrap().cents(), 100);
    }

    #[test]
    fn test_non_budgeted_nonzero_rejected() {
        let mut budget = Budget::new();
        let err = budget
            .add_account(&transfers(), Money::from_cents(5000))
            .unwrap_err();

        assert!(matches!(err, LedgerError::InvalidAmount { .. }));
        assert!(budget.is_empty());
    }

    #[test]
    fn test_non_budgeted_zero_placeholder() {
        let mut budget = Budget::new();
        budget.add_account(&transfers(), Money::zero()).unwrap();

        assert!(budget.is_present("Transfers"));
        let err = budget.get_amount(&transfers()).unwrap_err();
        assert!(matches!(err, LedgerError::NotBudgeted(_)));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let food = Account::expense("Food", "");
        let mut budget = Budget::new();
        let err = budget
            .add_account(&food, Money::from_cents(-100))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(budget.is_empty());

        budget.add_account(&food, Money::from_cents(100)).unwrap();
        assert!(budget
            .update_amount(&food, Money::from_cents(-1))
            .unwrap_err()
            .is_validation());
        assert_eq!(budget.get_amount(&food).unwrap().cents(), 100);
    }

    #[test]
    fn test_restore_line_keeps_stale_lines() {
        let mut budget = Budget::new();
        let line = BudgetLine {
            account: "Transfers".to_string(),
            amount: Money::from_cents(5000),
        };
        budget.restore_line(line.clone()).unwrap();
        assert_eq!(budget.iter().next(), Some(&line));

        let err = budget.restore_line(line).unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateAccount(_)));

        let negative = BudgetLine {
            account: "Food".to_string(),
            amount: Money::from_cents(-1),
        };
        assert!(budget.restore_line(negative).unwrap_err().is_validation());
        assert_eq!(budget.len(), 1);
    }

    #[test]
    fn test_get_absent_is_not_found() {
        let budget = Budget::new();
        let err = budget.get_amount(&Account::expense("Food", "")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_amount() {
        let food = Account::expense("Food", "");
        let mut budget = Budget::new();
        budget.add_account(&food, Money::from_cents(100)).unwrap();

        let previous = budget.update_amount(&food, Money::from_cents(300)).unwrap();
        assert_eq!(previous.cents(), 100);
        assert_eq!(budget.get_amount(&food).unwrap().cents(), 300);

        let rent = Account::expense("Rent", "");
        assert!(budget
            .update_amount(&rent, Money::from_cents(1))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_update_non_budgeted_rejected() {
        let mut budget = Budget::new();
        budget.add_account(&transfers(), Money::zero()).unwrap();

        let err = budget
            .update_amount(&transfers(), Money::from_cents(1))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount { .. }));
    }

    #[test]
    fn test_delete_account() {
        let food = Account::expense("Food", "");
        let mut budget = Budget::new();
        budget.add_account(&food, Money::from_cents(100)).unwrap();

        let removed = budget.delete_account("Food").unwrap();
        assert_eq!(removed.amount.cents(), 100);
        assert!(budget.delete_account("Food").unwrap_err().is_not_found());
    }

    #[test]
    fn test_insertion_order() {
        let mut budget = Budget::new();
        for name in ["Rent", "Food", "Utilities"] {
            budget
                .add_account(&Account::expense(name, ""), Money::from_cents(1))
                .unwrap();
        }
        assert_eq!(budget.list_accounts(), vec!["Rent", "Food", "Utilities"]);
    }

    #[test]
    fn test_clone_is_independent() {
        let food = Account::expense("Food", "");
        let mut default = Budget::new();
        default.add_account(&food, Money::from_cents(100)).unwrap();

        let month = default.clone();
        default.update_amount(&food, Money::from_cents(999)).unwrap();
        assert_eq!(month.get_amount(&food).unwrap().cents(), 100);
    }
}
