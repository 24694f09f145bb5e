//! Monthly reconciliation
//!
//! Combines the entries touching a month with that month's budget into a
//! per-account report of actual versus budgeted amounts.
//!
//! Budget amounts are stored unsigned and get the account's sign here, so
//! the variance is always `budgeted - actual`. An expense budget of 200.00
//! with 50.00 spent reports budgeted -200.00, actual -50.00, variance
//! -150.00.

use serde::Serialize;
use std::collections::HashMap;

use super::entries::EntryStore;
use super::registry::AccountRegistry;
use crate::models::{Budget, Entry, Money, YearMonth};

/// One account's row in a monthly report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountReconciliation {
    pub account: String,
    pub is_expense: bool,
    pub single_total: Money,
    pub repeating_total: Money,
    pub installment_total: Money,
    pub actual: Money,
    pub budgeted: Option<Money>,
    pub variance: Option<Money>,
}

/// Actual versus budget for one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyReport {
    pub month: YearMonth,
    pub has_budget: bool,
    pub accounts: Vec<AccountReconciliation>,
    pub total_income: Money,
    pub total_expense: Money,
    pub net: Money,
    pub total_budgeted: Money,
}

impl MonthlyReport {
    pub fn account(&self, name: &str) -> Option<&AccountReconciliation> {
        self.accounts.iter().find(|a| a.account == name)
    }
}

#[derive(Default)]
struct Totals {
    single: Money,
    repeating: Money,
    installment: Money,
}

/// Build the report for `month`
///
/// Rows follow registry order. Entries booked against accounts that are no
/// longer registered are left out.
pub fn reconcile(
    registry: &AccountRegistry,
    entries: &EntryStore,
    budget: Option<&Budget>,
    month: YearMonth,
) -> MonthlyReport {
    let mut totals: HashMap<String, Totals> = HashMap::new();

    for entry in entries.entries_for_month(month) {
        let Some(amount) = entry.amount_for_month(month) else {
            continue;
        };
        let bucket = totals.entry(entry.account().to_string()).or_default();
        match entry {
            Entry::Single(_) => bucket.single += amount,
            Entry::Repeating(_) => bucket.repeating += amount,
            Entry::Installment(_) => bucket.installment += amount,
        }
    }

    let mut report = MonthlyReport {
        month,
        has_budget: budget.is_some(),
        accounts: Vec::with_capacity(registry.len()),
        total_income: Money::zero(),
        total_expense: Money::zero(),
        net: Money::zero(),
        total_budgeted: Money::zero(),
    };

    for account in registry.list() {
        let t = totals.remove(&account.name).unwrap_or_default();
        let actual = t.single + t.repeating + t.installment;

        let budgeted = budget
            .and_then(|b| b.get_amount(account).ok())
            .map(|amount| account.apply_sign(amount));
        let variance = budgeted.map(|b| b - actual);

        if account.is_expense {
            report.total_expense += actual;
        } else {
            report.total_income += actual;
        }
        report.net += actual;
        if let Some(b) = budgeted {
            report.total_budgeted += b;
        }

        report.accounts.push(AccountReconciliation {
            account: account.name.clone(),
            is_expense: account.is_expense,
            single_total: t.single,
            repeating_total: t.repeating,
            installment_total: t.installment,
            actual,
            budgeted,
            variance,
        });
    }

    report
}
