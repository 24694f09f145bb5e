//! Configuration: where the ledger lives on disk and the user's settings

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::Settings;
