//! Installment entry CLI commands

use clap::Subcommand;

use super::{parse_amount, parse_month, parse_range, CommandContext, Outcome};
use crate::audit::{AuditEntry, EntityType};
use crate::display::entry::format_installment_entries;
use crate::error::LedgerResult;
use crate::ledger::Ledger;

/// Installment entry subcommands
#[derive(Subcommand)]
pub enum InstallmentCommands {
    /// Record a total paid in equal monthly parts
    ///
    /// Payments fall in every month from START up to, but not including, END.
    /// When START and END are the same month the whole total is paid then.
    Add {
        /// Unique description
        description: String,
        account: String,
        /// Total amount without sign
        amount: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: Option<String>,
    },
    /// List installments, optionally only those with a payment in a month
    List {
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Delete an installment entry by description
    Delete { description: String },
}

pub fn handle_installment_command(
    ledger: &mut Ledger,
    ctx: &CommandContext<'_>,
    cmd: InstallmentCommands,
) -> LedgerResult<Outcome> {
    match cmd {
        InstallmentCommands::Add {
            description,
            account,
            amount,
            start,
            end,
        } => {
            let amount = parse_amount(&amount)?;
            let months = parse_range(&start, end.as_deref())?;
            let entry = ledger.record_installment_entry(months, &description, &account, amount)?;
            ctx.record(AuditEntry::create(
                EntityType::InstallmentEntry,
                entry.description(),
                &entry,
            ))?;

            println!(
                "Recorded installment '{}': {} to {} in {} payment(s) of {}",
                entry.description(),
                ctx.money(entry.total()),
                entry.account(),
                entry.installment_count().max(1),
                ctx.money(entry.monthly_amount())
            );
            Ok(Outcome::Changed)
        }

        InstallmentCommands::List { month } => {
            let month = month.as_deref().map(parse_month).transpose()?;
            println!(
                "{}",
                format_installment_entries(&ledger.installment_entries(month), ctx.settings)
            );
            Ok(Outcome::Unchanged)
        }

        InstallmentCommands::Delete { description } => {
            let removed = ledger.delete_installment_entry(&description)?;
            ctx.record(AuditEntry::delete(
                EntityType::InstallmentEntry,
                &description,
                &removed,
            ))?;

            println!("Deleted installment entry: {}", description);
            Ok(Outcome::Changed)
        }
    }
}
