//! Report export
//!
//! - CSV: one row per account, spreadsheet friendly
//! - JSON: the whole report with export metadata

pub mod csv;
pub mod json;

pub use self::csv::export_report_csv;
pub use self::json::{export_report_json, ReportExport, EXPORT_SCHEMA_VERSION};
