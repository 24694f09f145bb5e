//! Entry listings

use chrono::NaiveDate;
use tabled::Tabled;

use super::{render_table, truncate};
use crate::config::Settings;
use crate::models::{InstallmentEntry, RepeatingEntry, SingleEntry};

#[derive(Tabled)]
struct SingleRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Single entries with the per-date index used by `entry delete`/`entry edit`
///
/// Input must be date ordered, as the store returns it.
pub fn format_single_entries<'a>(
    entries: impl IntoIterator<Item = &'a SingleEntry>,
    settings: &Settings,
) -> String {
    let mut rows = Vec::new();
    let mut current: Option<NaiveDate> = None;
    let mut index = 0;

    for entry in entries {
        if current == Some(entry.date) {
            index += 1;
        } else {
            current = Some(entry.date);
            index = 0;
        }
        rows.push(SingleRow {
            date: settings.format_date(entry.date),
            index,
            account: entry.account().to_string(),
            description: truncate(entry.description(), 40),
            amount: settings.format_money(entry.amount()),
        });
    }

    if rows.is_empty() {
        return "No entries found.".to_string();
    }
    render_table(rows, 4)
}

#[derive(Tabled)]
struct RepeatingRow {
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Months")]
    months: String,
    #[tabled(rename = "Monthly")]
    amount: String,
}

pub fn format_repeating_entries(entries: &[&RepeatingEntry], settings: &Settings) -> String {
    if entries.is_empty() {
        return "No repeating entries found.".to_string();
    }

    let rows = entries
        .iter()
        .map(|e| RepeatingRow {
            description: truncate(e.description(), 40),
            account: e.account().to_string(),
            months: e.months.to_string(),
            amount: settings.format_money(e.monthly_amount()),
        })
        .collect();
    render_table(rows, 3)
}

#[derive(Tabled)]
struct InstallmentRow {
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Months")]
    months: String,
    #[tabled(rename = "Payments")]
    payments: u32,
    #[tabled(rename = "Monthly")]
    monthly: String,
    #[tabled(rename = "Total")]
    total: String,
}

pub fn format_installment_entries(entries: &[&InstallmentEntry], settings: &Settings) -> String {
    if entries.is_empty() {
        return "No installment entries found.".to_string();
    }

    let rows = entries
        .iter()
        .map(|e| InstallmentRow {
            description: truncate(e.description(), 40),
            account: e.account().to_string(),
            months: e.months.to_string(),
            payments: e.installment_count().max(1),
            monthly: settings.format_money(e.monthly_amount()),
            total: settings.format_money(e.total()),
        })
        .collect();
    render_table(rows, 3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, Money, MonthRange, YearMonth};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn test_single_entries_indexed_per_date() {
        let food = Account::expense("Food", "");
        let entries = vec![
            SingleEntry::new(date(5), &food, "Groceries", Money::from_cents(5000)).unwrap(),
            SingleEntry::new(date(5), &food, "Snacks", Money::from_cents(300)).unwrap(),
            SingleEntry::new(date(6), &food, "Lunch", Money::from_cents(1200)).unwrap(),
        ];

        let out = format_single_entries(&entries, &Settings::default());
        let snacks = out.lines().find(|l| l.contains("Snacks")).unwrap();
        let lunch = out.lines().find(|l| l.contains("Lunch")).unwrap();
        assert!(snacks.contains(" 1 "));
        assert!(lunch.contains(" 0 "));
        assert!(out.contains("-$50.00"));
    }

    #[test]
    fn test_empty_lists() {
        let settings = Settings::default();
        assert_eq!(
            format_single_entries(Vec::<&SingleEntry>::new(), &settings),
            "No entries found."
        );
        assert_eq!(format_repeating_entries(&[], &settings), "No repeating entries found.");
        assert_eq!(
            format_installment_entries(&[], &settings),
            "No installment entries found."
        );
    }

    #[test]
    fn test_installment_columns() {
        let start = YearMonth::new(2024, 1).unwrap();
        let end = YearMonth::new(2024, 4).unwrap();
        let entry = InstallmentEntry::new(
            MonthRange::new(start, end).unwrap(),
            &Account::expense("Household", ""),
            "Sofa",
            Money::from_cents(90000),
        )
        .unwrap();

        let out = format_installment_entries(&[&entry], &Settings::default());
        assert!(out.contains("2024-01..2024-04"));
        assert!(out.contains("-$300.00"));
        assert!(out.contains("-$900.00"));
    }
}
