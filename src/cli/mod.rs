//! CLI command handlers
//!
//! Bridges clap argument parsing with the [`Ledger`](crate::ledger::Ledger).
//! Handlers parse and print only; every rule lives in the ledger. A handler
//! reports whether it changed anything so the caller knows to save.

pub mod account;
pub mod budget;
pub mod entry;
pub mod installment;
pub mod repeating;
pub mod report;

pub use account::{handle_account_command, AccountCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use entry::{handle_entry_command, EntryCommands};
pub use installment::{handle_installment_command, InstallmentCommands};
pub use repeating::{handle_repeating_command, RepeatingCommands};
pub use report::{handle_report_command, ReportArgs, ReportFormat};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, MonthRange, YearMonth};

/// Whether a command changed the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Changed,
    Unchanged,
}

/// What handlers need besides the ledger
pub struct CommandContext<'a> {
    pub settings: &'a Settings,
    pub audit: &'a AuditLogger,
}

impl CommandContext<'_> {
    pub(crate) fn record(&self, entry: AuditEntry) -> LedgerResult<()> {
        self.audit.log(&entry)
    }

    pub(crate) fn money(&self, amount: Money) -> String {
        self.settings.format_money(amount)
    }
}

/// Parse an amount typed on the command line
pub fn parse_amount(input: &str) -> LedgerResult<Money> {
    Money::parse(input).map_err(|e| {
        LedgerError::Validation(format!(
            "Invalid amount '{}'. Use a format like '50' or '50.25' ({})",
            input, e
        ))
    })
}

pub fn parse_month(input: &str) -> LedgerResult<YearMonth> {
    YearMonth::parse(input)
}

/// A range from `--start`/`--end`; a missing end means a single month
pub fn parse_range(start: &str, end: Option<&str>) -> LedgerResult<MonthRange> {
    let start = parse_month(start)?;
    match end {
        Some(end) => MonthRange::new(start, parse_month(end)?),
        None => Ok(MonthRange::single(start)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("50").unwrap().cents(), 5000);
        assert_eq!(parse_amount("$12.34").unwrap().cents(), 1234);
        assert!(parse_amount("fifty").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_range() {
        let range = parse_range("2024-01", Some("2024-03")).unwrap();
        assert_eq!(range.months_spanned(), 2);

        let single = parse_range("2024-05", None).unwrap();
        assert_eq!(single.start(), single.end());

        assert!(parse_range("2024-03", Some("2024-01")).is_err());
    }
}
