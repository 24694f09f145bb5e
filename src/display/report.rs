//! Monthly report formatting

use tabled::Tabled;

use super::render_table;
use crate::config::Settings;
use crate::ledger::MonthlyReport;
use crate::models::Money;

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Single")]
    single: String,
    #[tabled(rename = "Repeating")]
    repeating: String,
    #[tabled(rename = "Installments")]
    installments: String,
    #[tabled(rename = "Actual")]
    actual: String,
    #[tabled(rename = "Budgeted")]
    budgeted: String,
    #[tabled(rename = "Variance")]
    variance: String,
}

fn optional(amount: Option<Money>, settings: &Settings) -> String {
    amount.map(|m| settings.format_money(m)).unwrap_or_else(|| "-".to_string())
}

/// Actual versus budget table with a totals footer
pub fn format_monthly_report(report: &MonthlyReport, settings: &Settings) -> String {
    let mut output = format!("Report for {}\n", report.month);
    if !report.has_budget {
        output.push_str("(no budget for this month)\n");
    }

    if report.accounts.is_empty() {
        output.push_str("No accounts found.\n");
        return output;
    }

    let rows: Vec<_> = report
        .accounts
        .iter()
        .map(|r| ReportRow {
            account: r.account.clone(),
            single: settings.format_money(r.single_total),
            repeating: settings.format_money(r.repeating_total),
            installments: settings.format_money(r.installment_total),
            actual: settings.format_money(r.actual),
            budgeted: optional(r.budgeted, settings),
            variance: optional(r.variance, settings),
        })
        .collect();

    output.push_str(&render_table(rows, 1));
    output.push('\n');
    output.push_str(&format!(
        "\nIncome:   {:>14}\nExpenses: {:>14}\nNet:      {:>14}\nBudgeted: {:>14}\n",
        settings.format_money(report.total_income),
        settings.format_money(report.total_expense),
        settings.format_money(report.net),
        settings.format_money(report.total_budgeted),
    ));
    output
}
