//! Ledger entries
//!
//! Every entry shares one record, [`EntryDetails`]: the account it is booked
//! against, a description and a signed amount. The variants add their own
//! dates:
//!
//! - [`SingleEntry`]: one calendar date, the amount is the transaction itself.
//! - [`RepeatingEntry`]: an inclusive month range, the amount recurs every month.
//! - [`InstallmentEntry`]: a month range, the amount is a total spread over it.
//!
//! Constructors take a positive magnitude and apply the account's sign
//! convention, so an expense is always stored negative.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::account::Account;
use super::money::Money;
use super::month::{MonthRange, YearMonth};
use crate::error::{LedgerError, LedgerResult};

/// Fields common to every entry variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDetails {
    /// Name of the account the entry is booked against
    pub account: String,

    pub description: String,

    /// Signed amount (negative for expense accounts)
    pub amount: Money,
}

impl EntryDetails {
    fn signed(account: &Account, description: String, magnitude: Money) -> LedgerResult<Self> {
        if magnitude.is_negative() {
            return Err(LedgerError::Validation(format!(
                "Entry amount must be positive, got {}",
                magnitude
            )));
        }
        Ok(Self {
            account: account.name.clone(),
            description,
            amount: account.apply_sign(magnitude),
        })
    }
}

/// One dated transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleEntry {
    pub date: NaiveDate,

    #[serde(flatten)]
    pub details: EntryDetails,
}

impl SingleEntry {
    pub fn new(
        date: NaiveDate,
        account: &Account,
        description: impl Into<String>,
        magnitude: Money,
    ) -> LedgerResult<Self> {
        Ok(Self {
            date,
            details: EntryDetails::signed(account, description.into(), magnitude)?,
        })
    }

    pub fn account(&self) -> &str {
        &self.details.account
    }

    pub fn description(&self) -> &str {
        &self.details.description
    }

    pub fn amount(&self) -> Money {
        self.details.amount
    }

    pub fn month(&self) -> YearMonth {
        YearMonth::from_date(self.date)
    }
}

/// A transaction that recurs identically every month of its range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatingEntry {
    pub months: MonthRange,

    #[serde(flatten)]
    pub details: EntryDetails,
}

impl RepeatingEntry {
    pub fn new(
        months: MonthRange,
        account: &Account,
        description: impl Into<String>,
        monthly_magnitude: Money,
    ) -> LedgerResult<Self> {
        Ok(Self {
            months,
            details: EntryDetails::signed(account, description.into(), monthly_magnitude)?,
        })
    }

    pub fn account(&self) -> &str {
        &self.details.account
    }

    pub fn description(&self) -> &str {
        &self.details.description
    }

    pub fn monthly_amount(&self) -> Money {
        self.details.amount
    }

    pub fn covers(&self, month: YearMonth) -> bool {
        self.months.contains(month)
    }
}

/// A total amount paid off in monthly installments
///
/// The number of installments is the month distance between start and end.
/// Payments fall in `[start, end)`; a range that collapses to one month is
/// paid in full in its start month. The last payment absorbs the rounding
/// remainder so the payments always sum to the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentEntry {
    pub months: MonthRange,

    /// `details.amount` holds the signed total
    #[serde(flatten)]
    pub details: EntryDetails,
}

impl InstallmentEntry {
    pub fn new(
        months: MonthRange,
        account: &Account,
        description: impl Into<String>,
        total_magnitude: Money,
    ) -> LedgerResult<Self> {
        Ok(Self {
            months,
            details: EntryDetails::signed(account, description.into(), total_magnitude)?,
        })
    }

    pub fn account(&self) -> &str {
        &self.details.account
    }

    pub fn description(&self) -> &str {
        &self.details.description
    }

    pub fn total(&self) -> Money {
        self.details.amount
    }

    pub fn installment_count(&self) -> u32 {
        self.months.months_spanned()
    }

    /// The regular monthly payment
    ///
    /// Falls back to the total itself when the range collapses to zero
    /// months or the total is zero.
    pub fn monthly_amount(&self) -> Money {
        let count = self.installment_count();
        if count == 0 || self.total().is_zero() {
            self.total()
        } else {
            self.total().div_rounded(count)
        }
    }

    /// Payment due in `month`, if any
    pub fn payment_for(&self, month: YearMonth) -> Option<Money> {
        let count = self.installment_count();
        let offset = self.months.start().months_until(&month);

        if count == 0 {
            return (offset == 0).then(|| self.total());
        }
        if offset < 0 || offset as u32 >= count {
            return None;
        }

        let monthly = self.monthly_amount();
        if offset as u32 == count - 1 {
            Some(self.total() - monthly.times(count - 1))
        } else {
            Some(monthly)
        }
    }
}

/// Any ledger entry, consumed by pattern matching
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Entry {
    Single(SingleEntry),
    Repeating(RepeatingEntry),
    Installment(InstallmentEntry),
}

impl Entry {
    pub fn details(&self) -> &EntryDetails {
        match self {
            Entry::Single(e) => &e.details,
            Entry::Repeating(e) => &e.details,
            Entry::Installment(e) => &e.details,
        }
    }

    pub fn account(&self) -> &str {
        &self.details().account
    }

    pub fn description(&self) -> &str {
        &self.details().description
    }

    /// The signed amount this entry contributes to `month`
    pub fn amount_for_month(&self, month: YearMonth) -> Option<Money> {
        match self {
            Entry::Single(e) => month.contains(e.date).then_some(e.amount()),
            Entry::Repeating(e) => e.covers(month).then_some(e.monthly_amount()),
            Entry::Installment(e) => e.payment_for(month),
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            Entry::Single(_) => "single",
            Entry::Repeating(_) => "repeating",
            Entry::Installment(_) => "installment",
        }
    }
}

impl From<SingleEntry> for Entry {
    fn from(entry: SingleEntry) -> Self {
        Entry::Single(entry)
    }
}

impl From<RepeatingEntry> for Entry {
    fn from(entry: RepeatingEntry) -> Self {
        Entry::Repeating(entry)
    }
}

impl From<InstallmentEntry> for Entry {
    fn from(entry: InstallmentEntry) -> Self {
        Entry::Installment(entry)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Single(e) => write!(
                f,
                "{} {} [{}] {}",
                e.date,
                e.description(),
                e.account(),
                e.amount()
            ),
            Entry::Repeating(e) => write!(
                f,
                "{} {} [{}] {}/month",
                e.months,
                e.description(),
                e.account(),
                e.monthly_amount()
            ),
            Entry::Installment(e) => write!(
                f,
                "{} {} [{}] {} total",
                e.months,
                e.description(),
                e.account(),
                e.total()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn range(start: YearMonth, end: YearMonth) -> MonthRange {
        MonthRange::new(start, end).unwrap()
    }

    fn food() -> Account {
        Account::expense("Food", "groceries")
    }

    #[test]
    fn test_single_entry_sign_convention() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        let expense = SingleEntry::new(date, &food(), "Groceries", Money::from_cents(5000)).unwrap();
        assert_eq!(expense.amount().cents(), -5000);

        let payroll = Account::income("Payroll", "");
        let income = SingleEntry::new(date, &payroll, "Paycheck", Money::from_cents(5000)).unwrap();
        assert_eq!(income.amount().cents(), 5000);
    }

    #[test]
    fn test_negative_magnitude_rejected() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        let err = SingleEntry::new(date, &food(), "Refund", Money::from_cents(-100)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_repeating_entry_covers_inclusive_range() {
        let entry = RepeatingEntry::new(
            range(ym(2024, 1), ym(2024, 3)),
            &food(),
            "Subscription",
            Money::from_cents(1000),
        )
        .unwrap();

        assert_eq!(entry.monthly_amount().cents(), -1000);
        let entry = Entry::from(entry);
        assert_eq!(entry.amount_for_month(ym(2024, 1)), Some(Money::from_cents(-1000)));
        assert_eq!(entry.amount_for_month(ym(2024, 3)), Some(Money::from_cents(-1000)));
        assert_eq!(entry.amount_for_month(ym(2024, 4)), None);
        assert_eq!(entry.amount_for_month(ym(2023, 12)), None);
    }

    #[test]
    fn test_installment_spreads_total() {
        let entry = InstallmentEntry::new(
            range(ym(2024, 1), ym(2024, 4)),
            &food(),
            "Freezer",
            Money::from_cents(10000),
        )
        .unwrap();

        assert_eq!(entry.installment_count(), 3);
        assert_eq!(entry.monthly_amount().cents(), -3333);
        assert_eq!(entry.payment_for(ym(2024, 1)), Some(Money::from_cents(-3333)));
        assert_eq!(entry.payment_for(ym(2024, 2)), Some(Money::from_cents(-3333)));
        assert_eq!(entry.payment_for(ym(2024, 3)), Some(Money::from_cents(-3334)));
        assert_eq!(entry.payment_for(ym(2024, 4)), None);
        assert_eq!(entry.payment_for(ym(2023, 12)), None);
    }

    #[test]
    fn test_installment_collapsed_range_pays_total() {
        let entry = InstallmentEntry::new(
            MonthRange::single(ym(2024, 5)),
            &food(),
            "One-off",
            Money::from_cents(2599),
        )
        .unwrap();

        assert_eq!(entry.monthly_amount().cents(), -2599);
        assert_eq!(entry.payment_for(ym(2024, 5)), Some(Money::from_cents(-2599)));
        assert_eq!(entry.payment_for(ym(2024, 6)), None);
    }

    #[test]
    fn test_installment_zero_total() {
        let entry = InstallmentEntry::new(
            range(ym(2024, 1), ym(2024, 3)),
            &food(),
            "Free trial",
            Money::zero(),
        )
        .unwrap();

        assert_eq!(entry.monthly_amount(), Money::zero());
        assert_eq!(entry.payment_for(ym(2024, 2)), Some(Money::zero()));
    }

    #[test]
    fn test_single_entry_json_is_flat() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        let entry = SingleEntry::new(date, &food(), "Groceries", Money::from_cents(5000)).unwrap();
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["date"], "2024-06-05");
        assert_eq!(value["account"], "Food");
        assert_eq!(value["amount"], -5000);

        let back: SingleEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }
}
