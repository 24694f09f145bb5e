use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use monthly_ledger::audit::AuditLogger;
use monthly_ledger::cli::{
    handle_account_command, handle_budget_command, handle_entry_command,
    handle_installment_command, handle_repeating_command, handle_report_command, AccountCommands,
    BudgetCommands, CommandContext, EntryCommands, InstallmentCommands, Outcome, RepeatingCommands,
    ReportArgs,
};
use monthly_ledger::config::paths::DATA_DIR_ENV;
use monthly_ledger::config::{LedgerPaths, Settings};
use monthly_ledger::logging::init_tracing;
use monthly_ledger::storage::{load_ledger, save_ledger, JsonLedgerStore};

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Personal finance ledger with monthly budgets",
    long_about = "Record expenses and income against named accounts as single, \
                  repeating or installment entries, budget each month from a \
                  default template, and reconcile actual spending against it."
)]
struct Cli {
    /// Directory holding settings, data and the audit log
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new ledger
    Init,

    /// Show configuration
    Config,

    /// Show recent changes from the audit log
    Audit {
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Single (dated) entry commands
    #[command(subcommand)]
    Entry(EntryCommands),

    /// Repeating monthly entry commands
    #[command(subcommand)]
    Repeating(RepeatingCommands),

    /// Installment entry commands
    #[command(subcommand)]
    Installment(InstallmentCommands),

    /// Default and monthly budget commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Reconcile a month against its budget
    Report(ReportArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => LedgerPaths::with_base_dir(dir),
        None => LedgerPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings.log_filter);

    let command = match cli.command {
        Some(command) => command,
        None => {
            println!("Monthly Ledger - personal finance by the month");
            println!();
            println!("Run 'ledger --help' for usage information.");
            println!("Run 'ledger init' to create a new ledger.");
            return Ok(());
        }
    };

    match command {
        Commands::Init => return init(&paths, &settings),
        Commands::Config => {
            print_config(&paths, &settings);
            return Ok(());
        }
        Commands::Audit { count } => {
            let audit = AuditLogger::new(paths.audit_log());
            let entries = audit.read_recent(count)?;
            if entries.is_empty() {
                println!("No changes recorded.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
            return Ok(());
        }
        _ => {}
    }

    paths.ensure_directories()?;
    let store = JsonLedgerStore::new(paths.clone());
    let (mut ledger, load_report) = load_ledger(&store)
        .with_context(|| format!("Failed to load ledger from {}", paths.data_dir().display()))?;

    if !load_report.is_clean() {
        eprintln!(
            "Warning: skipped {} invalid record(s) while loading:",
            load_report.skipped.len()
        );
        for skipped in &load_report.skipped {
            eprintln!("  {} {}: {}", skipped.collection, skipped.record, skipped.reason);
        }
    }

    let audit = AuditLogger::new(paths.audit_log());
    let ctx = CommandContext {
        settings: &settings,
        audit: &audit,
    };

    let outcome = match command {
        Commands::Account(cmd) => handle_account_command(&mut ledger, &ctx, cmd)?,
        Commands::Entry(cmd) => handle_entry_command(&mut ledger, &ctx, cmd)?,
        Commands::Repeating(cmd) => handle_repeating_command(&mut ledger, &ctx, cmd)?,
        Commands::Installment(cmd) => handle_installment_command(&mut ledger, &ctx, cmd)?,
        Commands::Budget(cmd) => handle_budget_command(&mut ledger, &ctx, cmd)?,
        Commands::Report(args) => handle_report_command(&ledger, &ctx, args)?,
        Commands::Init | Commands::Config | Commands::Audit { .. } => Outcome::Unchanged,
    };

    if outcome == Outcome::Changed {
        save_ledger(&store, &ledger)?;
        info!(data_dir = %paths.data_dir().display(), "saved ledger");
    }

    Ok(())
}

fn init(paths: &LedgerPaths, settings: &Settings) -> Result<()> {
    if paths.is_initialized() {
        println!("Ledger already initialized at: {}", paths.base_dir().display());
        return Ok(());
    }

    println!("Initializing ledger at: {}", paths.base_dir().display());
    paths.ensure_directories()?;
    settings.save(paths)?;

    let store = JsonLedgerStore::new(paths.clone());
    let (ledger, _) = load_ledger(&store)?;
    save_ledger(&store, &ledger)?;

    println!("Initialization complete!");
    println!();
    println!("Next steps:");
    println!("  ledger account add Groceries --default-amount 400");
    println!("  ledger budget open {}", chrono::Local::now().format("%Y-%m"));
    Ok(())
}

fn print_config(paths: &LedgerPaths, settings: &Settings) {
    println!("Monthly Ledger Configuration");
    println!("============================");
    println!("Base directory:  {}", paths.base_dir().display());
    println!("Data directory:  {}", paths.data_dir().display());
    println!("Audit log:       {}", paths.audit_log().display());
    println!("Initialized:     {}", paths.is_initialized());
    println!();
    println!("Settings:");
    println!("  Currency symbol: {}", settings.currency_symbol);
    println!("  Date format:     {}", settings.date_format);
    println!("  Log filter:      {}", settings.log_filter);
}
