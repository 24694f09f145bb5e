//! Terminal output
//!
//! Every function returns a `String`; the CLI decides where it goes.
//! Listings are rendered as tables, detail views as aligned key/value lines.

pub mod account;
pub mod budget;
pub mod entry;
pub mod report;

pub use account::{format_account_details, format_account_list};
pub use budget::format_budget;
pub use entry::{format_installment_entries, format_repeating_entries, format_single_entries};
pub use report::format_monthly_report;

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

/// Render rows as a table, right-aligning the columns from `numeric_from` on
pub(crate) fn render_table<T: Tabled>(rows: Vec<T>, numeric_from: usize) -> String {
    Table::new(rows)
        .with(Style::psql())
        .with(Modify::new(Columns::new(numeric_from..)).with(Alignment::right()))
        .to_string()
}

/// Shorten to `max_len` characters, marking the cut with "..."
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return ".".repeat(max_len);
    }
    let kept: String = s.chars().take(max_len - 3).collect();
    format!("{}...", kept)
}
