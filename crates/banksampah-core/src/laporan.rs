//! Income report (laporan) for one waste bank over a date range

use serde::{Deserialize, Serialize};

use crate::aggregate::ItemLookup;
use crate::backup::kind_summary;
use crate::models::{Money, TransactionRecord};
use crate::query::{HeaderTotals, LedgerQuery};
use crate::reports::TypeSummary;
use crate::time::DateRange;
use crate::types::TransactionKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeReport {
    pub organization_id: String,
    pub period: DateRange,
    pub purchases: HeaderTotals,
    pub sales: HeaderTotals,
    pub withdrawals: HeaderTotals,
    pub general_income: HeaderTotals,
    pub general_expense: HeaderTotals,
    /// Sales minus purchases
    pub profit: Money,
    /// Money in minus money out across every kind
    pub net_cash_flow: Money,
    pub purchase_summary: Vec<TypeSummary>,
    pub sales_summary: Vec<TypeSummary>,
}

/// Build the laporan of `organization_id` for `range`
pub fn build_income_report(
    transactions: &[TransactionRecord],
    organization_id: &str,
    range: &DateRange,
    lookup: &ItemLookup,
) -> IncomeReport {
    let scoped = |kind| {
        LedgerQuery::of_kind(kind)
            .for_organization(organization_id)
            .within(*range)
    };
    let totals = |kind| scoped(kind).header_totals(transactions);

    let purchases = totals(TransactionKind::PurchaseFromCustomer);
    let sales = totals(TransactionKind::SaleToThirdParty);
    let withdrawals = totals(TransactionKind::CustomerWithdrawal);
    let general_income = totals(TransactionKind::GeneralIncome);
    let general_expense = totals(TransactionKind::GeneralExpense);

    let net_cash_flow = sales.total_value + general_income.total_value
        - purchases.total_value
        - withdrawals.total_value
        - general_expense.total_value;

    IncomeReport {
        organization_id: organization_id.to_string(),
        period: *range,
        profit: sales.total_value - purchases.total_value,
        net_cash_flow,
        purchases,
        sales,
        withdrawals,
        general_income,
        general_expense,
        purchase_summary: kind_summary(
            transactions,
            scoped(TransactionKind::PurchaseFromCustomer),
            lookup,
        ),
        sales_summary: kind_summary(transactions, scoped(TransactionKind::SaleToThirdParty), lookup),
    }
}
