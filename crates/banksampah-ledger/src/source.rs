//! Ledger sources

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::LedgerError;
use crate::snapshot::LedgerSnapshot;

/// Source reference type
pub type LedgerSourceRef = Arc<dyn LedgerSource>;

/// Anything able to produce one consistent ledger snapshot
#[async_trait]
pub trait LedgerSource: Send + Sync {
    async fn load(&self) -> Result<LedgerSnapshot, LedgerError>;
}

/// Parse a JSON ledger export
pub fn parse_snapshot(content: &str) -> Result<LedgerSnapshot, LedgerError> {
    Ok(serde_json::from_str(content)?)
}

/// Snapshot stored as a single JSON file
#[derive(Debug, Clone)]
pub struct JsonLedgerSource {
    path: PathBuf,
}

impl JsonLedgerSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl LedgerSource for JsonLedgerSource {
    async fn load(&self) -> Result<LedgerSnapshot, LedgerError> {
        log::info!("Loading ledger snapshot from {}", self.path.display());
        let content = tokio::fs::read_to_string(&self.path).await?;
        let snapshot = parse_snapshot(&content)?;
        log::info!(
            "Ledger loaded: {} organizations, {} transactions",
            snapshot.organizations.len(),
            snapshot.transactions.len()
        );
        Ok(snapshot)
    }
}
