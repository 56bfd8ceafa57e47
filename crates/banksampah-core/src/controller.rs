//! Overview for a controller supervising several waste banks

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Money, OrganizationProfile, TransactionRecord};
use crate::query::LedgerQuery;
use crate::time::DateRange;
use crate::types::TransactionKind;

/// Activity of one waste bank inside the overview window
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationRollup {
    pub organization_id: String,
    pub organization_name: String,
    pub customer_count: usize,
    pub total_sales: Money,
    pub total_purchases: Money,
    pub total_withdrawals: Money,
    pub profit: Money,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerOverview {
    pub period: DateRange,
    /// One row per waste bank, sorted by name
    pub organizations: Vec<OrganizationRollup>,
    /// Column sums over `organizations`
    pub totals: OrganizationRollup,
}

fn rollup(
    profile: &OrganizationProfile,
    customer_count: usize,
    transactions: &[TransactionRecord],
    range: &DateRange,
) -> OrganizationRollup {
    let query = LedgerQuery::new().for_organization(profile.id.as_str()).within(*range);

    let mut row = OrganizationRollup {
        organization_id: profile.id.clone(),
        organization_name: profile.name.clone(),
        customer_count,
        ..Default::default()
    };

    for tx in query.select(transactions) {
        row.transaction_count += 1;
        match tx.kind {
            TransactionKind::SaleToThirdParty => row.total_sales += tx.total_value,
            TransactionKind::PurchaseFromCustomer => row.total_purchases += tx.total_value,
            TransactionKind::CustomerWithdrawal => row.total_withdrawals += tx.total_value,
            TransactionKind::GeneralIncome | TransactionKind::GeneralExpense => {}
        }
    }
    row.profit = row.total_sales - row.total_purchases;
    row
}

/// Per-bank rollup plus grand totals
///
/// Transactions of organizations missing from `organizations` are ignored.
pub fn controller_overview(
    organizations: &[OrganizationProfile],
    customer_counts: &HashMap<String, usize>,
    transactions: &[TransactionRecord],
    range: &DateRange,
) -> ControllerOverview {
    let mut rows: Vec<OrganizationRollup> = organizations
        .iter()
        .map(|org| {
            let customers = customer_counts.get(&org.id).copied().unwrap_or(0);
            rollup(org, customers, transactions, range)
        })
        .collect();
    rows.sort_by(|a, b| a.organization_name.cmp(&b.organization_name));

    let mut totals = OrganizationRollup {
        organization_name: "Total".to_string(),
        ..Default::default()
    };
    for row in &rows {
        totals.customer_count += row.customer_count;
        totals.total_sales += row.total_sales;
        totals.total_purchases += row.total_purchases;
        totals.total_withdrawals += row.total_withdrawals;
        totals.profit += row.profit;
        totals.transaction_count += row.transaction_count;
    }

    log::debug!(
        "Controller overview over {} bank(s), {}",
        rows.len(),
        range.description()
    );

    ControllerOverview {
        period: *range,
        organizations: rows,
        totals,
    }
}
