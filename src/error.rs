//! Custom error types for the monthly ledger
//!
//! This module defines the error hierarchy for the ledger using thiserror.
//! The first group of variants are the ledger's own validation failures; the
//! rest wrap the ambient concerns (files, JSON, CSV, configuration).

use thiserror::Error;

use crate::models::{Money, YearMonth};

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// An account name collided in the registry or in a budget
    #[error("Account already exists: {0}")]
    DuplicateAccount(String),

    /// A budget has already been opened for this month
    #[error("Month already open: {0}")]
    DuplicateMonth(YearMonth),

    /// A repeating or installment entry with this description already exists
    #[error("Entry already exists: {0}")]
    DuplicateEntry(String),

    /// Non-zero amount against an account that is not budgeted
    #[error("Account '{account}' isn't a budgeted account, can't set amount {amount}")]
    InvalidAmount { account: String, amount: Money },

    /// Lookup by key or index failed
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Account is present in a budget but isn't eligible for an amount
    #[error("Account '{0}' isn't a budgeted account")]
    NotBudgeted(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl LedgerError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for a month's budget
    pub fn month_not_found(month: YearMonth) -> Self {
        Self::NotFound {
            entity_type: "Month",
            identifier: month.to_string(),
        }
    }

    /// Create a "not found" error for entries
    pub fn entry_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Entry",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = LedgerError::account_not_found("Food");
        assert_eq!(err.to_string(), "Account not found: Food");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_duplicate_month_error() {
        let err = LedgerError::DuplicateMonth(YearMonth::new(2024, 6).unwrap());
        assert_eq!(err.to_string(), "Month already open: 2024-06");
    }

    #[test]
    fn test_invalid_amount_error() {
        let err = LedgerError::InvalidAmount {
            account: "Transfers".into(),
            amount: Money::from_cents(5000),
        };
        assert_eq!(
            err.to_string(),
            "Account 'Transfers' isn't a budgeted account, can't set amount $50.00"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let ledger_err: LedgerError = io_err.into();
        assert!(matches!(ledger_err, LedgerError::Io(_)));
    }
}
