//! Ledger snapshot readers
//!
//! Loads the exported ledger and scopes it to one waste bank before it is
//! handed to the reporting engine.

pub mod error;
pub mod snapshot;
pub mod source;

pub use error::LedgerError;
pub use snapshot::{LedgerSnapshot, OrgScoped};
pub use source::{parse_snapshot, JsonLedgerSource, LedgerSource, LedgerSourceRef};
