//! Audit trail of ledger changes
//!
//! Every create, update and delete the CLI performs is appended to
//! `audit.log` as one JSON object per line, with the affected record's JSON
//! before and after the change.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
