//! Account CLI commands

use clap::{Subcommand, ValueEnum};

use super::{parse_amount, CommandContext, Outcome};
use crate::audit::{AuditEntry, EntityType};
use crate::display::account::{format_account_details, format_account_list};
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AccountKind {
    Expense,
    Income,
}

impl AccountKind {
    fn is_expense(self) -> bool {
        self == AccountKind::Expense
    }
}

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Register a new account
    Add {
        /// Account name (unique, case-sensitive)
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short, long, value_enum, default_value_t = AccountKind::Expense)]
        kind: AccountKind,
        /// Keep the account out of budgets
        #[arg(long)]
        unbudgeted: bool,
        /// Also add the account to the default budget with this amount
        #[arg(long)]
        default_amount: Option<String>,
    },
    /// List all accounts
    List,
    /// Show account details
    Show { name: String },
    /// Change an account's description or flags
    Edit {
        name: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long, value_enum)]
        kind: Option<AccountKind>,
        /// true or false
        #[arg(long)]
        budgeted: Option<bool>,
    },
    /// Remove an account (entries and monthly budget lines are kept)
    Remove { name: String },
}

pub fn handle_account_command(
    ledger: &mut Ledger,
    ctx: &CommandContext<'_>,
    cmd: AccountCommands,
) -> LedgerResult<Outcome> {
    match cmd {
        AccountCommands::Add {
            name,
            description,
            kind,
            unbudgeted,
            default_amount,
        } => {
            let default_amount = default_amount.as_deref().map(parse_amount).transpose()?;
            let account = ledger.register_account(
                &name,
                &description,
                kind.is_expense(),
                !unbudgeted,
                default_amount,
            )?;
            ctx.record(AuditEntry::create(EntityType::Account, &account.name, &account))?;

            println!("Registered account: {}", account);
            if let Some(amount) = default_amount {
                println!("  Default budget: {}", ctx.money(amount));
            }
            Ok(Outcome::Changed)
        }

        AccountCommands::List => {
            println!(
                "{}",
                format_account_list(ledger.accounts(), ledger.default_budget(), ctx.settings)
            );
            Ok(Outcome::Unchanged)
        }

        AccountCommands::Show { name } => {
            let account = ledger
                .find_account(&name)
                .ok_or_else(|| LedgerError::account_not_found(&name))?;
            print!(
                "{}",
                format_account_details(account, ledger.default_budget(), ctx.settings)
            );
            Ok(Outcome::Unchanged)
        }

        AccountCommands::Edit {
            name,
            description,
            kind,
            budgeted,
        } => {
            let before = ledger
                .find_account(&name)
                .cloned()
                .ok_or_else(|| LedgerError::account_not_found(&name))?;

            if description.is_none() && kind.is_none() && budgeted.is_none() {
                println!("No changes specified. Use --description, --kind or --budgeted.");
                return Ok(Outcome::Unchanged);
            }

            let after = ledger.update_account(
                &name,
                description.as_deref().unwrap_or(&before.description),
                kind.map_or(before.is_expense, AccountKind::is_expense),
                budgeted.unwrap_or(before.is_budgeted),
            )?;
            ctx.record(AuditEntry::update(EntityType::Account, &name, &before, &after))?;

            println!("Updated account: {}", after);
            if after.is_expense != before.is_expense {
                println!("  Existing entries keep their recorded sign.");
            }
            Ok(Outcome::Changed)
        }

        AccountCommands::Remove { name } => {
            let removed = ledger.remove_account(&name)?;
            ctx.record(AuditEntry::delete(EntityType::Account, &name, &removed))?;

            println!("Removed account: {}", removed.name);
            Ok(Outcome::Changed)
        }
    }
}
