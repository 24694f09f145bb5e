//! Budget CLI commands

use clap::Subcommand;

use super::{parse_amount, parse_month, CommandContext, Outcome};
use crate::audit::{AuditEntry, EntityType};
use crate::display::budget::format_budget;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::BudgetLine;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Open a month, copying the default budget into it
    Open {
        /// Month (YYYY-MM)
        month: String,
    },
    /// List months that have a budget
    Months,
    /// Manage the default budget template
    #[command(subcommand)]
    Default(DefaultBudgetCommands),
    /// Manage one month's budget
    #[command(subcommand)]
    Month(MonthBudgetCommands),
}

#[derive(Subcommand)]
pub enum DefaultBudgetCommands {
    /// Add an account to the default budget
    Add { account: String, amount: String },
    /// Remove an account from the default budget
    Remove { account: String },
    /// Change an account's default amount
    Set { account: String, amount: String },
    /// Show the default budget
    Show,
}

#[derive(Subcommand)]
pub enum MonthBudgetCommands {
    /// Add an account to a month's budget (opens the month if needed)
    Add {
        month: String,
        account: String,
        amount: String,
    },
    /// Remove an account from a month's budget
    Remove { month: String, account: String },
    /// Change an account's amount for a month
    Set {
        month: String,
        account: String,
        amount: String,
    },
    /// Show a month's budget
    Show { month: String },
}

pub fn handle_budget_command(
    ledger: &mut Ledger,
    ctx: &CommandContext<'_>,
    cmd: BudgetCommands,
) -> LedgerResult<Outcome> {
    match cmd {
        BudgetCommands::Open { month } => {
            let month = parse_month(&month)?;
            let budget = ledger.open_month(month)?.clone();
            ctx.record(AuditEntry::create(EntityType::Month, month.to_string(), &budget))?;

            println!(
                "Opened {} with {} budget line(s) from the default budget",
                month,
                budget.len()
            );
            Ok(Outcome::Changed)
        }

        BudgetCommands::Months => {
            let months: Vec<_> = ledger.months().collect();
            if months.is_empty() {
                println!("No months opened yet.");
            } else {
                for month in months {
                    println!("{}", month);
                }
            }
            Ok(Outcome::Unchanged)
        }

        BudgetCommands::Default(cmd) => handle_default_command(ledger, ctx, cmd),
        BudgetCommands::Month(cmd) => handle_month_command(ledger, ctx, cmd),
    }
}

fn handle_default_command(
    ledger: &mut Ledger,
    ctx: &CommandContext<'_>,
    cmd: DefaultBudgetCommands,
) -> LedgerResult<Outcome> {
    const ID: &str = "default";

    match cmd {
        DefaultBudgetCommands::Add { account, amount } => {
            let amount = parse_amount(&amount)?;
            ledger.add_default_budget_account(&account, amount)?;
            let line = BudgetLine {
                account: account.clone(),
                amount,
            };
            ctx.record(AuditEntry::create(EntityType::Budget, ID, &line).named(&account))?;

            println!("Default budget: {} set to {}", account, ctx.money(amount));
            Ok(Outcome::Changed)
        }

        DefaultBudgetCommands::Remove { account } => {
            let line = ledger.remove_default_budget_account(&account)?;
            ctx.record(AuditEntry::delete(EntityType::Budget, ID, &line).named(&account))?;

            println!("Removed {} from the default budget", account);
            Ok(Outcome::Changed)
        }

        DefaultBudgetCommands::Set { account, amount } => {
            let amount = parse_amount(&amount)?;
            let previous = ledger.update_default_budget_amount(&account, amount)?;
            ctx.record(
                AuditEntry::update(EntityType::Budget, ID, &previous, &amount).named(&account),
            )?;

            println!(
                "Default budget: {} changed from {} to {}",
                account,
                ctx.money(previous),
                ctx.money(amount)
            );
            Ok(Outcome::Changed)
        }

        DefaultBudgetCommands::Show => {
            println!(
                "{}",
                format_budget(
                    "Default budget",
                    ledger.default_budget(),
                    ledger.accounts(),
                    ctx.settings
                )
            );
            Ok(Outcome::Unchanged)
        }
    }
}

fn handle_month_command(
    ledger: &mut Ledger,
    ctx: &CommandContext<'_>,
    cmd: MonthBudgetCommands,
) -> LedgerResult<Outcome> {
    match cmd {
        MonthBudgetCommands::Add {
            month,
            account,
            amount,
        } => {
            let month = parse_month(&month)?;
            let amount = parse_amount(&amount)?;
            ledger.add_monthly_budget_account(month, &account, amount)?;
            let line = BudgetLine {
                account: account.clone(),
                amount,
            };
            ctx.record(
                AuditEntry::create(EntityType::Budget, month.to_string(), &line).named(&account),
            )?;

            println!("{} budget: {} set to {}", month, account, ctx.money(amount));
            Ok(Outcome::Changed)
        }

        MonthBudgetCommands::Remove { month, account } => {
            let month = parse_month(&month)?;
            let line = ledger.remove_monthly_budget_account(month, &account)?;
            ctx.record(
                AuditEntry::delete(EntityType::Budget, month.to_string(), &line).named(&account),
            )?;

            println!("Removed {} from the {} budget", account, month);
            Ok(Outcome::Changed)
        }

        MonthBudgetCommands::Set {
            month,
            account,
            amount,
        } => {
            let month = parse_month(&month)?;
            let amount = parse_amount(&amount)?;
            let previous = ledger.update_monthly_budget_amount(month, &account, amount)?;
            ctx.record(
                AuditEntry::update(EntityType::Budget, month.to_string(), &previous, &amount)
                    .named(&account),
            )?;

            println!(
                "{} budget: {} changed from {} to {}",
                month,
                account,
                ctx.money(previous),
                ctx.money(amount)
            );
            Ok(Outcome::Changed)
        }

        MonthBudgetCommands::Show { month } => {
            let month = parse_month(&month)?;
            let budget = ledger
                .monthly_budget(month)
                .ok_or_else(|| LedgerError::month_not_found(month))?;
            println!(
                "{}",
                format_budget(
                    &format!("Budget for {}", month),
                    budget,
                    ledger.accounts(),
                    ctx.settings
                )
            );
            Ok(Outcome::Unchanged)
        }
    }
}
