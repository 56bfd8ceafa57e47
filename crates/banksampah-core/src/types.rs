//! Basic enumerations for the ledger model

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Transaction kind enumeration
///
/// Serialized with the names the posting subsystem stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Waste bought from a customer at the weighing desk (penimbangan)
    #[serde(rename = "PEMASUKAN")]
    PurchaseFromCustomer,
    /// Aggregated waste sold to a third-party buyer (penjualan sampah)
    #[serde(rename = "PENJUALAN_SAMPAH")]
    SaleToThirdParty,
    /// Customer cashing out their balance (penarikan)
    #[serde(rename = "PENGELUARAN")]
    CustomerWithdrawal,
    /// Income not tied to waste trading
    #[serde(rename = "PEMASUKAN_UMUM")]
    GeneralIncome,
    /// Expense not tied to waste trading
    #[serde(rename = "PENGELUARAN_UMUM")]
    GeneralExpense,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 5] = [
        TransactionKind::PurchaseFromCustomer,
        TransactionKind::SaleToThirdParty,
        TransactionKind::CustomerWithdrawal,
        TransactionKind::GeneralIncome,
        TransactionKind::GeneralExpense,
    ];

    /// Contribution of this kind to waste-trading profit: +1 for sales,
    /// -1 for purchases, 0 for everything else.
    pub fn profit_sign(&self) -> i64 {
        match self {
            TransactionKind::SaleToThirdParty => 1,
            TransactionKind::PurchaseFromCustomer => -1,
            _ => 0,
        }
    }

    /// Name used by the posting subsystem
    pub fn source_name(&self) -> &'static str {
        match self {
            TransactionKind::PurchaseFromCustomer => "PEMASUKAN",
            TransactionKind::SaleToThirdParty => "PENJUALAN_SAMPAH",
            TransactionKind::CustomerWithdrawal => "PENGELUARAN",
            TransactionKind::GeneralIncome => "PEMASUKAN_UMUM",
            TransactionKind::GeneralExpense => "PENGELUARAN_UMUM",
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "pemasukan" | "purchase" | "penimbangan" => Ok(TransactionKind::PurchaseFromCustomer),
            "penjualan-sampah" | "sale" | "penjualan" => Ok(TransactionKind::SaleToThirdParty),
            "pengeluaran" | "withdrawal" | "penarikan" => Ok(TransactionKind::CustomerWithdrawal),
            "pemasukan-umum" | "income" => Ok(TransactionKind::GeneralIncome),
            "pengeluaran-umum" | "expense" => Ok(TransactionKind::GeneralExpense),
            _ => Err(CoreError::UnknownKind {
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::PurchaseFromCustomer => write!(f, "purchase"),
            TransactionKind::SaleToThirdParty => write!(f, "sale"),
            TransactionKind::CustomerWithdrawal => write!(f, "withdrawal"),
            TransactionKind::GeneralIncome => write!(f, "income"),
            TransactionKind::GeneralExpense => write!(f, "expense"),
        }
    }
}

/// Measuring unit of a waste type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Unit {
    /// Kilograms
    Kg,
    /// Pieces
    Pcs,
}

impl Default for Unit {
    fn default() -> Self {
        Unit::Kg
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Kg => write!(f, "KG"),
            Unit::Pcs => write!(f, "PCS"),
        }
    }
}
