//! Aggregation and reporting engine for waste-bank (bank sampah) ledgers
//!
//! Everything in this crate is a pure function over records that the
//! caller has already fetched and scoped to a tenant:
//!
//! - `query`: selecting transactions by organization, kind and date range
//! - `aggregate`: per waste-type summaries and the "Semua Jenis" fallback
//! - `profit`: zero-filled daily profit series and profit rollups
//! - `backup`: the consolidated backup snapshot
//! - `laporan`: the income report of one bank over a range
//! - `controller`: the multi-bank overview for controllers

pub mod aggregate;
pub mod backup;
pub mod controller;
pub mod error;
pub mod laporan;
pub mod models;
pub mod profit;
pub mod query;
pub mod reports;
pub mod time;
pub mod types;

pub use aggregate::{
    aggregate_by_type, item_lookup, sorted_by_value, with_fallback, ItemLookup, ItemRef,
    FALLBACK_TYPE_NAME, UNKNOWN_TYPE_NAME,
};
pub use backup::{
    assemble_backup_snapshot, assemble_backup_snapshot_at, dashboard_summary, BackupInputs,
    BackupSnapshot, BackupSummary,
};
pub use controller::{controller_overview, ControllerOverview, OrganizationRollup};
pub use error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger, ErrorSeverity};
pub use laporan::{build_income_report, IncomeReport};
pub use models::{
    line_subtotal, Customer, DetailLine, InventoryItem, Money, OrganizationProfile,
    TransactionRecord,
};
pub use profit::{build_daily_profit, daily_profit_series, profit_chart_data, profit_totals};
pub use query::{HeaderTotals, LedgerQuery};
pub use reports::{ChartData, ChartDataset, DailyProfitPoint, ProfitTotals, TypeSummary};
pub use time::{DateRange, LookbackDays, RangePreset};
pub use types::{TransactionKind, Unit};

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_end_to_end_purchases_and_sale() {
        let at = |d: u32, h: u32| Utc.with_ymd_and_hms(2024, 1, d, h, 0, 0).unwrap();
        let record = |id: &str, kind, occurred_at, line: DetailLine| TransactionRecord {
            id: id.to_string(),
            kind,
            total_value: line.subtotal,
            note: None,
            customer_relation_id: None,
            organization_id: "bs1".to_string(),
            occurred_at,
            detail_lines: vec![line],
        };

        let ledger = vec![
            record("p1", TransactionKind::PurchaseFromCustomer, at(5, 8), DetailLine::new("A", Decimal::from(2), 1000)),
            record("p2", TransactionKind::PurchaseFromCustomer, at(5, 15), DetailLine::new("A", Decimal::from(1), 1000)),
            record("s1", TransactionKind::SaleToThirdParty, at(6, 10), DetailLine::new("A", Decimal::from(2), 1800)),
        ];
        let lookup = item_lookup(&[InventoryItem {
            id: "A".to_string(),
            waste_type_name: "A".to_string(),
            unit: Unit::Kg,
            price: 1000,
            stock: Decimal::ZERO,
        }]);

        let purchases = aggregate_by_type(
            LedgerQuery::of_kind(TransactionKind::PurchaseFromCustomer).detail_lines(&ledger),
            &lookup,
        );
        assert_eq!(
            purchases,
            vec![TypeSummary {
                inventory_item_id: Some("A".to_string()),
                waste_type_name: "A".to_string(),
                unit: Unit::Kg,
                total_quantity: Decimal::from(3),
                total_value: 3000,
                transaction_count: 2,
                average_unit_price: Decimal::from(1000),
            }]
        );

        let sales = aggregate_by_type(
            LedgerQuery::of_kind(TransactionKind::SaleToThirdParty).detail_lines(&ledger),
            &lookup,
        );
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].total_quantity, Decimal::from(2));
        assert_eq!(sales[0].total_value, 3600);
        assert_eq!(sales[0].transaction_count, 1);
        assert_eq!(sales[0].average_unit_price, Decimal::from(1800));

        let summary = dashboard_summary(&[], &[], &ledger);
        assert_eq!(summary.profit, 600);

        let series = build_daily_profit(&ledger, day(5), day(6)).unwrap();
        assert_eq!(
            series,
            vec![
                DailyProfitPoint { date: day(5), profit: -3000 },
                DailyProfitPoint { date: day(6), profit: 3600 },
            ]
        );
    }
}
