//! Monthly Ledger - personal finance bookkeeping by the month
//!
//! Accounts are registered once and classified as expense or income, and as
//! budgeted or not. Transactions are recorded as single dated entries,
//! repeating monthly entries, or installments spread over a month range.
//! Each month may carry a budget seeded from a default template, and a
//! month's entries can be reconciled against it.
//!
//! # Architecture
//!
//! - `models`: money, months, accounts, entries, budgets
//! - `ledger`: account registry, entry store, reconciliation and the
//!   [`Ledger`] facade that enforces cross-component rules
//! - `storage`: persistence port with JSON file and in-memory stores
//! - `config`: path resolution and user settings
//! - `audit`: append-only JSON-lines change log
//! - `display`, `export`: table, CSV and JSON rendering
//! - `cli`: clap command handlers
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use monthly_ledger::{models::{Money, YearMonth}, Ledger};
//!
//! let mut ledger = Ledger::new();
//! ledger.register_account("Food", "Groceries", true, true, Some(Money::from_cents(20000)))?;
//! let june = YearMonth::new(2024, 6)?;
//! ledger.open_month(june)?;
//! ledger.record_single_entry(
//!     NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
//!     "Market",
//!     "Food",
//!     Money::from_cents(5000),
//! )?;
//!
//! let report = ledger.reconcile(june);
//! assert_eq!(report.total_expense, Money::from_cents(-5000));
//! # Ok::<(), monthly_ledger::LedgerError>(())
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
pub use ledger::Ledger;
