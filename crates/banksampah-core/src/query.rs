//! Ledger selection by organization, kind and date range

use serde::{Deserialize, Serialize};

use crate::models::{DetailLine, Money, TransactionRecord};
use crate::time::DateRange;
use crate::types::TransactionKind;

/// Header-level totals of a set of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderTotals {
    pub total_value: Money,
    pub count: usize,
}

impl HeaderTotals {
    fn add(&mut self, tx: &TransactionRecord) {
        self.total_value += tx.total_value;
        self.count += 1;
    }
}

/// Filter over transaction records
///
/// Empty criteria match everything: a query with no kinds selects all
/// kinds, a query with no range selects all dates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerQuery {
    organization_id: Option<String>,
    kinds: Vec<TransactionKind>,
    range: Option<DateRange>,
}

impl LedgerQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a query over a single kind
    pub fn of_kind(kind: TransactionKind) -> Self {
        Self::new().with_kind(kind)
    }

    pub fn for_organization(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    pub fn with_kind(mut self, kind: TransactionKind) -> Self {
        if !self.kinds.contains(&kind) {
            self.kinds.push(kind);
        }
        self
    }

    pub fn within(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn range(&self) -> Option<&DateRange> {
        self.range.as_ref()
    }

    /// Check if a transaction satisfies every criterion
    pub fn matches(&self, tx: &TransactionRecord) -> bool {
        if let Some(ref org) = self.organization_id {
            if tx.organization_id != *org {
                return false;
            }
        }
        if !self.kinds.is_empty() && !self.kinds.contains(&tx.kind) {
            return false;
        }
        match self.range {
            Some(ref range) => range.contains(&tx.occurred_at),
            None => true,
        }
    }

    /// Matching transactions in ledger order
    pub fn select<'a>(&self, transactions: &'a [TransactionRecord]) -> Vec<&'a TransactionRecord> {
        transactions.iter().filter(|t| self.matches(t)).collect()
    }

    /// Detail lines of matching transactions, flattened in ledger order
    pub fn detail_lines<'a>(&self, transactions: &'a [TransactionRecord]) -> Vec<&'a DetailLine> {
        transactions
            .iter()
            .filter(|t| self.matches(t))
            .flat_map(|t| t.detail_lines.iter())
            .collect()
    }

    /// Summed header totals and count of matching transactions
    pub fn header_totals(&self, transactions: &[TransactionRecord]) -> HeaderTotals {
        let mut totals = HeaderTotals::default();
        for tx in transactions.iter().filter(|t| self.matches(t)) {
            totals.add(tx);
        }
        totals
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;

    fn tx(id: &str, org: &str, kind: TransactionKind, value: Money, day: u32) -> TransactionRecord {
        TransactionRecord {
            id: id.to_string(),
            kind,
            total_value: value,
            note: None,
            customer_relation_id: None,
            organization_id: org.to_string(),
            occurred_at: Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap(),
            detail_lines: vec![DetailLine::new("A", Decimal::ONE, value)],
        }
    }

    fn ledger() -> Vec<TransactionRecord> {
        vec![
            tx("t1", "bs1", TransactionKind::PurchaseFromCustomer, 2000, 5),
            tx("t2", "bs1", TransactionKind::SaleToThirdParty, 3600, 6),
            tx("t3", "bs2", TransactionKind::PurchaseFromCustomer, 500, 5),
            tx("t4", "bs1", TransactionKind::PurchaseFromCustomer, 1000, 20),
            tx("t5", "bs1", TransactionKind::CustomerWithdrawal, 700, 6),
        ]
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let ledger = ledger();
        assert_eq!(LedgerQuery::new().select(&ledger).len(), ledger.len());
    }

    #[test]
    fn test_query_by_org_kind_and_range() {
        let ledger = ledger();
        let range = DateRange::days(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        )
        .unwrap();
        let query = LedgerQuery::of_kind(TransactionKind::PurchaseFromCustomer)
            .for_organization("bs1")
            .within(range);

        let ids: Vec<&str> = query.select(&ledger).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1"]);
        assert_eq!(query.header_totals(&ledger), HeaderTotals { total_value: 2000, count: 1 });
    }

    #[test]
    fn test_multiple_kinds() {
        let ledger = ledger();
        let query = LedgerQuery::new()
            .for_organization("bs1")
            .with_kind(TransactionKind::SaleToThirdParty)
            .with_kind(TransactionKind::CustomerWithdrawal)
            .with_kind(TransactionKind::SaleToThirdParty);
        assert_eq!(query.header_totals(&ledger), HeaderTotals { total_value: 4300, count: 2 });
    }

    #[test]
    fn test_detail_lines_flatten_in_order() {
        let ledger = ledger();
        let lines = LedgerQuery::of_kind(TransactionKind::PurchaseFromCustomer)
            .for_organization("bs1")
            .detail_lines(&ledger);
        let subtotals: Vec<Money> = lines.iter().map(|l| l.subtotal).collect();
        assert_eq!(subtotals, vec![2000, 1000]);
    }
}
