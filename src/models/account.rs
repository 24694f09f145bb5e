//! Account model
//!
//! An account is a named income or expense category ("Food", "Payroll").
//! Its name is its identity: entries and budgets refer to it by name.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// An income or expense category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique, case-sensitive account name
    pub name: String,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Expense accounts store entry amounts as negative numbers
    pub is_expense: bool,

    /// Whether amounts for this account can appear in a budget
    pub is_budgeted: bool,
}

impl Account {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        is_expense: bool,
        is_budgeted: bool,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            is_expense,
            is_budgeted,
        }
    }

    /// A budgeted expense account
    pub fn expense(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, true, true)
    }

    /// A budgeted income account
    pub fn income(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, false, true)
    }

    /// Apply this account's sign convention to a magnitude
    ///
    /// Expense amounts become negative so that every stored amount can be
    /// summed into a net total without branching on the account type.
    pub fn apply_sign(&self, magnitude: Money) -> Money {
        if self.is_expense {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Short label for the account type
    pub fn kind_label(&self) -> &'static str {
        if self.is_expense {
            "Expense"
        } else {
            "Income"
        }
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(AccountValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind_label())
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Account name too long ({} chars, max 100)", len)
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}
