//! Ledger records consumed by the reporting engine
//!
//! These are read-only views of what the posting subsystem stores. Nothing
//! here validates amounts: a detail line whose subtotal disagrees with its
//! quantity and price is aggregated as given.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{TransactionKind, Unit};

/// Money amount in whole rupiah
pub type Money = i64;

/// `quantity * unit_price`, truncated toward zero to a whole currency unit.
pub fn line_subtotal(quantity: Decimal, unit_price: Money) -> Money {
    // Saturates to 0 only for products beyond the i64 range
    (quantity * Decimal::from(unit_price))
        .trunc()
        .to_i64()
        .unwrap_or(0)
}

/// One waste-type movement inside a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailLine {
    pub inventory_item_id: String,
    /// Amount in the item's unit (kilograms or pieces)
    pub quantity: Decimal,
    /// Price at the time of the transaction
    pub unit_price: Money,
    pub subtotal: Money,
}

impl DetailLine {
    /// Build a line with its subtotal derived from quantity and price
    pub fn new(inventory_item_id: impl Into<String>, quantity: Decimal, unit_price: Money) -> Self {
        Self {
            inventory_item_id: inventory_item_id.into(),
            quantity,
            unit_price,
            subtotal: line_subtotal(quantity, unit_price),
        }
    }
}

/// Immutable ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: String,
    pub kind: TransactionKind,
    pub total_value: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Customer-at-bank relationship; absent for sales and general entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_relation_id: Option<String>,
    pub organization_id: String,
    pub occurred_at: DateTime<Utc>,
    #[serde(default)]
    pub detail_lines: Vec<DetailLine>,
}

impl TransactionRecord {
    /// UTC calendar day used for bucketing
    pub fn day(&self) -> NaiveDate {
        self.occurred_at.date_naive()
    }

    /// Signed contribution to waste-trading profit
    pub fn signed_profit(&self) -> Money {
        self.kind.profit_sign() * self.total_value
    }

    /// Sum of detail-line subtotals
    pub fn lines_total(&self) -> Money {
        self.detail_lines.iter().map(|l| l.subtotal).sum()
    }
}

/// Waste-type catalog entry (inventaris)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub waste_type_name: String,
    #[serde(default)]
    pub unit: Unit,
    /// Current buying price per unit
    #[serde(default)]
    pub price: Money,
    /// Current stock in `unit`
    #[serde(default)]
    pub stock: Decimal,
}

impl InventoryItem {
    /// Stock valued at the current price
    pub fn stock_value(&self) -> Money {
        line_subtotal(self.stock, self.price)
    }
}

/// Customer (nasabah) relationship with a waste bank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub relation_id: String,
    pub name: String,
    #[serde(default)]
    pub balance: Money,
}

/// Waste-bank profile printed on report headers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationProfile {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_line_subtotal_truncates() {
        assert_eq!(line_subtotal(Decimal::new(25, 1), 1000), 2500);
        assert_eq!(line_subtotal(Decimal::new(333, 3), 1000), 333);
        // 1.337 kg * 1500 = 2005.5
        assert_eq!(line_subtotal(Decimal::new(1337, 3), 1500), 2005);
        assert_eq!(line_subtotal(Decimal::ZERO, 1500), 0);
    }

    #[test]
    fn test_detail_line_new() {
        let line = DetailLine::new("botol", Decimal::from(2), 1800);
        assert_eq!(line.subtotal, 3600);
        assert_eq!(line.inventory_item_id, "botol");
    }

    #[test]
    fn test_transaction_day_and_profit() {
        let tx = TransactionRecord {
            id: "t1".to_string(),
            kind: TransactionKind::PurchaseFromCustomer,
            total_value: 3000,
            note: None,
            customer_relation_id: Some("n1".to_string()),
            organization_id: "bs1".to_string(),
            occurred_at: Utc.with_ymd_and_hms(2024, 1, 5, 23, 30, 0).unwrap(),
            detail_lines: vec![
                DetailLine::new("A", Decimal::from(2), 1000),
                DetailLine::new("A", Decimal::from(1), 1000),
            ],
        };

        assert_eq!(tx.day(), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(tx.signed_profit(), -3000);
        assert_eq!(tx.lines_total(), 3000);
    }

    #[test]
    fn test_transaction_deserializes_camel_case() {
        let json = r#"{
            "id": "t9",
            "kind": "PENJUALAN_SAMPAH",
            "totalValue": 10000,
            "organizationId": "bs1",
            "occurredAt": "2024-03-01T08:00:00Z"
        }"#;
        let tx: TransactionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(tx.kind, TransactionKind::SaleToThirdParty);
        assert!(tx.detail_lines.is_empty());
        assert!(tx.note.is_none());
    }

    #[test]
    fn test_inventory_stock_value() {
        let item = InventoryItem {
            id: "kardus".to_string(),
            waste_type_name: "Kardus".to_string(),
            unit: Unit::Kg,
            price: 1500,
            stock: Decimal::new(125, 1),
        };
        assert_eq!(item.stock_value(), 18750);
    }
}
