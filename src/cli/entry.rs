//! Single entry CLI commands

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use super::{parse_amount, parse_month, CommandContext, Outcome};
use crate::audit::{AuditEntry, EntityType};
use crate::display::entry::format_single_entries;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;

/// Single entry subcommands
#[derive(Subcommand)]
pub enum EntryCommands {
    /// Record a dated transaction
    Add {
        /// Account name
        account: String,
        /// Amount without sign; the account type decides the sign
        amount: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Date (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// List entries for a date, a month, or everything
    List {
        #[arg(long, conflicts_with = "month")]
        date: Option<String>,
        /// Month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Delete the entry at a date and index (see `entry list`)
    Delete { date: String, index: usize },
    /// Edit the entry at a date and index
    Edit {
        date: String,
        index: usize,
        #[arg(long)]
        new_date: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        account: Option<String>,
        #[arg(long)]
        amount: Option<String>,
    },
}

fn entry_id(date: NaiveDate, index: usize) -> String {
    format!("{}#{}", date, index)
}

pub fn handle_entry_command(
    ledger: &mut Ledger,
    ctx: &CommandContext<'_>,
    cmd: EntryCommands,
) -> LedgerResult<Outcome> {
    match cmd {
        EntryCommands::Add {
            account,
            amount,
            description,
            date,
        } => {
            let amount = parse_amount(&amount)?;
            let date = match date {
                Some(d) => ctx.settings.parse_date(&d)?,
                None => Local::now().date_naive(),
            };

            let entry = ledger.record_single_entry(date, &description, &account, amount)?;
            let index = ledger.single_entry_count(date) - 1;
            ctx.record(
                AuditEntry::create(EntityType::SingleEntry, entry_id(date, index), &entry)
                    .named(entry.description()),
            )?;

            println!(
                "Recorded {} on {} to {} (index {})",
                ctx.money(entry.amount()),
                ctx.settings.format_date(date),
                entry.account(),
                index
            );
            Ok(Outcome::Changed)
        }

        EntryCommands::List { date, month } => {
            let output = if let Some(date) = date {
                let date = ctx.settings.parse_date(&date)?;
                format_single_entries(ledger.single_entries().list_for_date(date), ctx.settings)
            } else if let Some(month) = month {
                let month = parse_month(&month)?;
                format_single_entries(
                    ledger.single_entries().list_for_month(month),
                    ctx.settings,
                )
            } else {
                format_single_entries(ledger.single_entries().list_all(), ctx.settings)
            };
            println!("{}", output);
            Ok(Outcome::Unchanged)
        }

        EntryCommands::Delete { date, index } => {
            let date = ctx.settings.parse_date(&date)?;
            let removed = ledger.delete_single_entry(date, index)?;
            ctx.record(
                AuditEntry::delete(EntityType::SingleEntry, entry_id(date, index), &removed)
                    .named(removed.description()),
            )?;

            println!(
                "Deleted entry: {} {}",
                removed.description(),
                ctx.money(removed.amount())
            );
            Ok(Outcome::Changed)
        }

        EntryCommands::Edit {
            date,
            index,
            new_date,
            description,
            account,
            amount,
        } => {
            let date = ctx.settings.parse_date(&date)?;
            let current = ledger
                .get_single_entry(date, index)
                .cloned()
                .ok_or_else(|| LedgerError::entry_not_found(entry_id(date, index)))?;

            if new_date.is_none() && description.is_none() && account.is_none() && amount.is_none() {
                println!("No changes specified. Use --new-date, --description, --account or --amount.");
                return Ok(Outcome::Unchanged);
            }

            let target_date = match new_date {
                Some(d) => ctx.settings.parse_date(&d)?,
                None => date,
            };
            let magnitude = match amount {
                Some(a) => parse_amount(&a)?,
                None => current.amount().abs(),
            };

            let old = ledger.update_single_entry(
                date,
                index,
                target_date,
                description.as_deref().unwrap_or(current.description()),
                account.as_deref().unwrap_or(current.account()),
                magnitude,
            )?;

            let new_index = if target_date == date {
                index
            } else {
                ledger.single_entry_count(target_date) - 1
            };
            let updated = ledger
                .get_single_entry(target_date, new_index)
                .cloned()
                .ok_or_else(|| LedgerError::entry_not_found(entry_id(target_date, new_index)))?;
            ctx.record(
                AuditEntry::update(
                    EntityType::SingleEntry,
                    entry_id(target_date, new_index),
                    &old,
                    &updated,
                )
                .named(updated.description()),
            )?;

            println!(
                "Updated entry: {} {} on {} (index {})",
                updated.description(),
                ctx.money(updated.amount()),
                ctx.settings.format_date(target_date),
                new_index
            );
            Ok(Outcome::Changed)
        }
    }
}
