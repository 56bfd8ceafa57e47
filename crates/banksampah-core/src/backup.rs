//! Consolidated backup snapshot of one waste bank
//!
//! The same snapshot feeds the on-screen backup page and the PDF export.
//! Assembly is pure composition over inputs fetched by the caller; the
//! caller is responsible for fetching them from one consistent view.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate_by_type, item_lookup, with_fallback, ItemLookup};
use crate::models::{Customer, InventoryItem, Money, OrganizationProfile, TransactionRecord};
use crate::query::LedgerQuery;
use crate::reports::TypeSummary;
use crate::types::TransactionKind;

/// Everything the assembler needs, already scoped to one organization
#[derive(Debug, Clone, PartialEq)]
pub struct BackupInputs {
    pub profile: OrganizationProfile,
    pub customers: Vec<Customer>,
    pub inventory: Vec<InventoryItem>,
    /// Display-only slice; never aggregated
    pub recent_transactions: Vec<TransactionRecord>,
    /// Full transaction history, detail lines included
    pub transactions: Vec<TransactionRecord>,
}

/// Scalar dashboard figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSummary {
    pub total_customers: usize,
    pub total_balance: Money,
    pub total_stock: Decimal,
    pub total_inventory_value: Money,
    pub total_purchases: Money,
    pub total_sales: Money,
    pub total_withdrawals: Money,
    /// `total_sales - total_purchases`
    pub profit: Money,
}

/// Consolidated report of one waste bank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSnapshot {
    pub organization: OrganizationProfile,
    pub customers: Vec<Customer>,
    pub inventory: Vec<InventoryItem>,
    pub recent_transactions: Vec<TransactionRecord>,
    pub summary: BackupSummary,
    pub purchase_summary: Vec<TypeSummary>,
    pub sales_summary: Vec<TypeSummary>,
    pub generated_at: DateTime<Utc>,
}

/// Dashboard figures over customers, inventory and the full ledger
pub fn dashboard_summary(
    customers: &[Customer],
    inventory: &[InventoryItem],
    transactions: &[TransactionRecord],
) -> BackupSummary {
    let kind_total = |kind| LedgerQuery::of_kind(kind).header_totals(transactions).total_value;

    let total_purchases = kind_total(TransactionKind::PurchaseFromCustomer);
    let total_sales = kind_total(TransactionKind::SaleToThirdParty);

    BackupSummary {
        total_customers: customers.len(),
        total_balance: customers.iter().map(|c| c.balance).sum(),
        total_stock: inventory.iter().map(|i| i.stock).sum(),
        total_inventory_value: inventory.iter().map(InventoryItem::stock_value).sum(),
        total_purchases,
        total_sales,
        total_withdrawals: kind_total(TransactionKind::CustomerWithdrawal),
        profit: total_sales - total_purchases,
    }
}

/// Per-type summary of one kind with the "Semua Jenis" fallback applied
pub(crate) fn kind_summary(
    transactions: &[TransactionRecord],
    query: LedgerQuery,
    lookup: &ItemLookup,
) -> Vec<TypeSummary> {
    let rows = aggregate_by_type(query.detail_lines(transactions), lookup);
    with_fallback(rows, query.header_totals(transactions))
}

/// Assemble a snapshot stamped with the current time
pub fn assemble_backup_snapshot(inputs: BackupInputs) -> BackupSnapshot {
    assemble_backup_snapshot_at(inputs, Utc::now())
}

/// Assemble a snapshot stamped with `generated_at`
pub fn assemble_backup_snapshot_at(inputs: BackupInputs, generated_at: DateTime<Utc>) -> BackupSnapshot {
    let summary = dashboard_summary(&inputs.customers, &inputs.inventory, &inputs.transactions);
    let lookup = item_lookup(&inputs.inventory);

    let purchase_summary = kind_summary(
        &inputs.transactions,
        LedgerQuery::of_kind(TransactionKind::PurchaseFromCustomer),
        &lookup,
    );
    let sales_summary = kind_summary(
        &inputs.transactions,
        LedgerQuery::of_kind(TransactionKind::SaleToThirdParty),
        &lookup,
    );

    log::info!(
        "Assembled backup for {} ({} customers, {} transactions, profit {})",
        inputs.profile.name,
        summary.total_customers,
        inputs.transactions.len(),
        summary.profit
    );

    BackupSnapshot {
        organization: inputs.profile,
        customers: inputs.customers,
        inventory: inputs.inventory,
        recent_transactions: inputs.recent_transactions,
        summary,
        purchase_summary,
        sales_summary,
        generated_at,
    }
}

// ==================== Tests ====================
