//! Core data models for the monthly ledger
//!
//! Plain data: accounts, money, months, entries and budgets. The rules that
//! tie them together live in [`crate::ledger`].

pub mod account;
pub mod budget;
pub mod entry;
pub mod money;
pub mod month;

pub use account::{Account, AccountValidationError};
pub use budget::{Budget, BudgetLine};
pub use entry::{Entry, EntryDetails, InstallmentEntry, RepeatingEntry, SingleEntry};
pub use money::{Money, MoneyParseError};
pub use month::{MonthRange, YearMonth};
