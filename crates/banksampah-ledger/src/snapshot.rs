//! In-memory ledger snapshot and tenant scoping
//!
//! Customers and inventory items are tagged with the organization that
//! owns them; transactions carry their own `organizationId`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use banksampah_core::{
    BackupInputs, Customer, InventoryItem, OrganizationProfile, TransactionRecord,
};

use crate::error::LedgerError;

/// Record owned by one organization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgScoped<T> {
    pub organization_id: String,
    #[serde(flatten)]
    pub record: T,
}

impl<T> OrgScoped<T> {
    pub fn new(organization_id: impl Into<String>, record: T) -> Self {
        Self {
            organization_id: organization_id.into(),
            record,
        }
    }
}

/// Whole ledger as exported by the posting subsystem
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub organizations: Vec<OrganizationProfile>,
    #[serde(default)]
    pub customers: Vec<OrgScoped<Customer>>,
    #[serde(default)]
    pub inventory: Vec<OrgScoped<InventoryItem>>,
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
}

fn owned_by<'a, T: Clone + 'a>(
    records: impl IntoIterator<Item = &'a OrgScoped<T>>,
    organization_id: &str,
) -> Vec<T> {
    records
        .into_iter()
        .filter(|r| r.organization_id == organization_id)
        .map(|r| r.record.clone())
        .collect()
}

impl LedgerSnapshot {
    pub fn organization(&self, organization_id: &str) -> Result<&OrganizationProfile, LedgerError> {
        self.organizations
            .iter()
            .find(|o| o.id == organization_id)
            .ok_or_else(|| LedgerError::UnknownOrganization {
                id: organization_id.to_string(),
            })
    }

    pub fn customers_of(&self, organization_id: &str) -> Vec<Customer> {
        owned_by(&self.customers, organization_id)
    }

    pub fn inventory_of(&self, organization_id: &str) -> Vec<InventoryItem> {
        owned_by(&self.inventory, organization_id)
    }

    pub fn transactions_of(&self, organization_id: &str) -> Vec<TransactionRecord> {
        self.transactions
            .iter()
            .filter(|t| t.organization_id == organization_id)
            .cloned()
            .collect()
    }

    /// Customer count per organization id
    pub fn customer_counts(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for c in &self.customers {
            *counts.entry(c.organization_id.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Inputs of the backup snapshot for one organization
    ///
    /// `recent_limit` bounds the display-only slice, newest first.
    pub fn backup_inputs(
        &self,
        organization_id: &str,
        recent_limit: usize,
    ) -> Result<BackupInputs, LedgerError> {
        let profile = self.organization(organization_id)?.clone();
        let transactions = self.transactions_of(organization_id);

        let mut recent = transactions.clone();
        recent.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        recent.truncate(recent_limit);

        log::debug!(
            "Scoped ledger to {}: {} transactions, {} recent",
            organization_id,
            transactions.len(),
            recent.len()
        );

        Ok(BackupInputs {
            profile,
            customers: self.customers_of(organization_id),
            inventory: self.inventory_of(organization_id),
            recent_transactions: recent,
            transactions,
        })
    }
}
