//! Budget display formatting

use tabled::Tabled;

use super::render_table;
use crate::config::Settings;
use crate::models::{Account, Budget};

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// A budget's lines under a title such as "Default budget" or "2024-06"
///
/// Lines for non-budgeted accounts show as placeholders; lines whose account
/// is no longer registered are marked.
pub fn format_budget(title: &str, budget: &Budget, accounts: &[Account], settings: &Settings) -> String {
    if budget.is_empty() {
        return format!("{}: no budget lines.", title);
    }

    let rows: Vec<_> = budget
        .iter()
        .map(|line| {
            let amount = match accounts.iter().find(|a| a.name == line.account) {
                Some(a) if a.is_budgeted => settings.format_money(line.amount),
                Some(_) => "(not budgeted)".to_string(),
                None => format!("{} (unregistered)", settings.format_money(line.amount)),
            };
            BudgetRow {
                account: line.account.clone(),
                amount,
            }
        })
        .collect();

    let total = budget
        .iter()
        .filter(|line| accounts.iter().any(|a| a.name == line.account && a.is_budgeted))
        .map(|line| line.amount)
        .sum();

    format!(
        "{}\n{}\nTotal: {}",
        title,
        render_table(rows, 1),
        settings.format_money(total)
    )
}
