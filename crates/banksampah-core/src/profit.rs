//! Daily profit series and profit rollups
//!
//! Profit is always sales to third parties minus purchases from customers.
//! Withdrawals and general income/expense never enter it.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::CoreResult;
use crate::models::{Money, TransactionRecord};
use crate::reports::{ChartData, ChartDataset, DailyProfitPoint, ProfitTotals};
use crate::time::DateRange;
use crate::types::TransactionKind;

/// Daily profit for every calendar day in `start..=end`
///
/// Fails with `InvalidRange` when `start > end`.
pub fn build_daily_profit(
    transactions: &[TransactionRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> CoreResult<Vec<DailyProfitPoint>> {
    let range = DateRange::days(start, end)?;
    Ok(daily_profit_series(transactions, &range))
}

/// Daily profit over an already validated range
///
/// Emits exactly one point per day of the range, ascending, zero-filled.
pub fn daily_profit_series(
    transactions: &[TransactionRecord],
    range: &DateRange,
) -> Vec<DailyProfitPoint> {
    let mut buckets: HashMap<NaiveDate, Money> = HashMap::new();

    for tx in transactions.iter().filter(|t| range.contains(&t.occurred_at)) {
        if tx.kind.profit_sign() == 0 {
            continue;
        }
        *buckets.entry(tx.day()).or_insert(0) += tx.signed_profit();
    }

    let points: Vec<DailyProfitPoint> = range
        .iter_days()
        .map(|date| DailyProfitPoint {
            date,
            profit: buckets.get(&date).copied().unwrap_or(0),
        })
        .collect();

    log::debug!(
        "Built profit series {} ({} points, {} active days)",
        range.description(),
        points.len(),
        buckets.len()
    );

    points
}

/// Sales, purchases and profit of all transactions inside `range`
pub fn profit_totals(transactions: &[TransactionRecord], range: &DateRange) -> ProfitTotals {
    let mut totals = ProfitTotals::default();
    for tx in transactions.iter().filter(|t| range.contains(&t.occurred_at)) {
        match tx.kind {
            TransactionKind::SaleToThirdParty => totals.total_sales += tx.total_value,
            TransactionKind::PurchaseFromCustomer => totals.total_purchases += tx.total_value,
            _ => {}
        }
    }
    totals.profit = totals.total_sales - totals.total_purchases;
    totals
}

/// Line-chart payload for the dashboard profit chart
pub fn profit_chart_data(points: &[DailyProfitPoint]) -> ChartData {
    ChartData {
        chart_type: "line".to_string(),
        title: "Keuntungan Harian".to_string(),
        labels: points.iter().map(|p| p.date.format("%Y-%m-%d").to_string()).collect(),
        datasets: vec![ChartDataset {
            label: "Keuntungan".to_string(),
            data: points.iter().map(|p| p.profit).collect(),
            background_color: Some("rgba(34, 197, 94, 0.2)".to_string()),
            border_color: Some("rgba(34, 197, 94, 1)".to_string()),
        }],
    }
}

// ==================== Tests ====================
