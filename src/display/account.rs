//! Account display formatting

use tabled::Tabled;

use super::render_table;
use crate::config::Settings;
use crate::models::{Account, Budget};

#[derive(Tabled)]
struct AccountRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Budgeted")]
    budgeted: &'static str,
    #[tabled(rename = "Default")]
    default_amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Accounts in registry order with their default budget amounts
pub fn format_account_list(accounts: &[Account], default_budget: &Budget, settings: &Settings) -> String {
    if accounts.is_empty() {
        return "No accounts found.".to_string();
    }

    let rows = accounts
        .iter()
        .map(|a| AccountRow {
            name: a.name.clone(),
            kind: a.kind_label(),
            budgeted: yes_no(a.is_budgeted),
            default_amount: default_budget
                .get_amount(a)
                .map(|m| settings.format_money(m))
                .unwrap_or_default(),
            description: super::truncate(&a.description, 40),
        })
        .collect();

    render_table(rows, 3)
}

pub fn format_account_details(account: &Account, default_budget: &Budget, settings: &Settings) -> String {
    let mut output = format!("Account: {}\n", account.name);
    output.push_str(&format!("  Type:           {}\n", account.kind_label()));
    output.push_str(&format!("  Budgeted:       {}\n", yes_no(account.is_budgeted)));

    let default = if !default_budget.is_present(&account.name) {
        "(not in default budget)".to_string()
    } else {
        default_budget
            .get_amount(account)
            .map(|m| settings.format_money(m))
            .unwrap_or_else(|_| "(placeholder)".to_string())
    };
    output.push_str(&format!("  Default budget: {}\n", default));

    if !account.description.is_empty() {
        output.push_str(&format!("  Description:    {}\n", account.description));
    }
    output
}
