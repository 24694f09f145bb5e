//! Repeating entry CLI commands

use clap::Subcommand;

use super::{parse_amount, parse_month, parse_range, CommandContext, Outcome};
use crate::audit::{AuditEntry, EntityType};
use crate::display::entry::format_repeating_entries;
use crate::error::LedgerResult;
use crate::ledger::Ledger;

/// Repeating entry subcommands
#[derive(Subcommand)]
pub enum RepeatingCommands {
    /// Record a transaction that recurs every month of a range
    Add {
        /// Unique description
        description: String,
        account: String,
        /// Monthly amount without sign
        amount: String,
        /// First month (YYYY-MM)
        #[arg(long)]
        start: String,
        /// Last month, inclusive (defaults to the first)
        #[arg(long)]
        end: Option<String>,
    },
    /// List repeating entries, optionally only those covering a month
    List {
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Delete a repeating entry by description
    Delete { description: String },
}

pub fn handle_repeating_command(
    ledger: &mut Ledger,
    ctx: &CommandContext<'_>,
    cmd: RepeatingCommands,
) -> LedgerResult<Outcome> {
    match cmd {
        RepeatingCommands::Add {
            description,
            account,
            amount,
            start,
            end,
        } => {
            let amount = parse_amount(&amount)?;
            let months = parse_range(&start, end.as_deref())?;
            let entry = ledger.record_repeating_entry(months, &description, &account, amount)?;
            ctx.record(AuditEntry::create(
                EntityType::RepeatingEntry,
                entry.description(),
                &entry,
            ))?;

            println!(
                "Recorded repeating entry '{}': {} per month to {} ({})",
                entry.description(),
                ctx.money(entry.monthly_amount()),
                entry.account(),
                entry.months
            );
            Ok(Outcome::Changed)
        }

        RepeatingCommands::List { month } => {
            let month = month.as_deref().map(parse_month).transpose()?;
            println!(
                "{}",
                format_repeating_entries(&ledger.repeating_entries(month), ctx.settings)
            );
            Ok(Outcome::Unchanged)
        }

        RepeatingCommands::Delete { description } => {
            let removed = ledger.delete_repeating_entry(&description)?;
            ctx.record(AuditEntry::delete(
                EntityType::RepeatingEntry,
                &description,
                &removed,
            ))?;

            println!("Deleted repeating entry: {}", description);
            Ok(Outcome::Changed)
        }
    }
}
