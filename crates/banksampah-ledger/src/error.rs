//! Error types for banksampah-ledger

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed ledger snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown organization: {id}")]
    UnknownOrganization { id: String },
}

impl LedgerError {
    /// Hints printed by the CLI next to the error
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            LedgerError::Io(_) => vec![
                "Check data.path and data.ledger_file in the configuration".to_string(),
            ],
            LedgerError::Json(_) => vec![
                "The snapshot must be a JSON object with organizations, customers, inventory and transactions".to_string(),
            ],
            LedgerError::UnknownOrganization { .. } => vec![
                "Pass --org with an id listed under organizations".to_string(),
                "Or set reports.organization_id in the configuration".to_string(),
            ],
        }
    }
}
