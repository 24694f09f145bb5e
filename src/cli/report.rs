//! Report CLI command

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use super::{parse_month, CommandContext, Outcome};
use crate::display::report::format_monthly_report;
use crate::error::LedgerResult;
use crate::export::{export_report_csv, export_report_json};
use crate::ledger::Ledger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Table,
    Csv,
    Json,
}

/// Reconcile a month's entries against its budget
#[derive(Args)]
pub struct ReportArgs {
    /// Month (YYYY-MM)
    pub month: String,
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Table)]
    pub format: ReportFormat,
    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn handle_report_command(
    ledger: &Ledger,
    ctx: &CommandContext<'_>,
    args: ReportArgs,
) -> LedgerResult<Outcome> {
    let month = parse_month(&args.month)?;
    let report = ledger.reconcile(month);

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        ReportFormat::Table => {
            write!(writer, "{}", format_monthly_report(&report, ctx.settings))?;
        }
        ReportFormat::Csv => export_report_csv(&report, &mut writer)?,
        ReportFormat::Json => export_report_json(&report, &mut writer)?,
    }
    writer.flush()?;

    if let Some(path) = &args.output {
        eprintln!("Report for {} written to {}", month, path.display());
    }
    Ok(Outcome::Unchanged)
}
