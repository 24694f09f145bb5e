//! JSON export of a monthly report

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::MonthlyReport;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// A report wrapped with export metadata
#[derive(Debug, Clone, Serialize)]
pub struct ReportExport<'a> {
    pub schema_version: &'static str,
    pub exported_at: DateTime<Utc>,
    pub app_version: &'static str,
    pub report: &'a MonthlyReport,
}

impl<'a> ReportExport<'a> {
    pub fn new(report: &'a MonthlyReport) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            report,
        }
    }
}

/// Write the report as pretty JSON; amounts are integer cents
pub fn export_report_json<W: Write>(report: &MonthlyReport, mut writer: W) -> LedgerResult<()> {
    serde_json::to_writer_pretty(&mut writer, &ReportExport::new(report))?;
    writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(())
}
