//! Report structures handed to renderers
//!
//! Field names serialize in camelCase; the HTML and PDF layers read them
//! verbatim.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Money;
use crate::types::Unit;

/// Per waste-type totals over a set of detail lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeSummary {
    /// Grouping key; `None` on the synthetic "Semua Jenis" row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_item_id: Option<String>,
    pub waste_type_name: String,
    pub unit: Unit,
    pub total_quantity: Decimal,
    pub total_value: Money,
    pub transaction_count: usize,
    /// `total_value / total_quantity` rounded half-even to two decimals;
    /// zero when nothing was weighed
    pub average_unit_price: Decimal,
}

/// Profit of one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyProfitPoint {
    pub date: NaiveDate,
    pub profit: Money,
}

/// Sales, purchases and their difference over a window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitTotals {
    pub total_sales: Money,
    pub total_purchases: Money,
    pub profit: Money,
}

/// Chart data for visualization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub chart_type: String,
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

/// Chart dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<Money>,
    pub background_color: Option<String>,
    pub border_color: Option<String>,
}
