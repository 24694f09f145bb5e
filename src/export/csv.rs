//! CSV export of a monthly report

use std::io::Write;

use crate::error::LedgerResult;
use crate::ledger::MonthlyReport;
use crate::models::Money;

const HEADER: [&str; 10] = [
    "Month",
    "Account",
    "Type",
    "Single",
    "Repeating",
    "Installments",
    "Actual",
    "Budgeted",
    "Variance",
    "Has Budget",
];

/// Plain decimal, no currency symbol
fn decimal(amount: Money) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    format!("{}{}.{:02}", sign, amount.units().abs(), amount.cents_part())
}

fn optional(amount: Option<Money>) -> String {
    amount.map(decimal).unwrap_or_default()
}

/// Write one row per account; blank budget cells mean "no budget line"
pub fn export_report_csv<W: Write>(report: &MonthlyReport, writer: W) -> LedgerResult<()> {
    let mut csv = ::csv::Writer::from_writer(writer);
    csv.write_record(HEADER)?;

    let month = report.month.to_string();
    for row in &report.accounts {
        let record = [
            month.clone(),
            row.account.clone(),
            if row.is_expense { "expense" } else { "income" }.to_string(),
            decimal(row.single_total),
            decimal(row.repeating_total),
            decimal(row.installment_total),
            decimal(row.actual),
            optional(row.budgeted),
            optional(row.variance),
            report.has_budget.to_string(),
        ];
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}
