//! Dashboard data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Dashboard summary response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Sum of purchase bill totals.
    pub total_purchases: Decimal,
    /// Sum of sale bill totals.
    pub total_sales: Decimal,
    /// Outstanding amount owed to suppliers.
    pub total_payables: Decimal,
    /// Outstanding amount owed by customers.
    pub total_receivables: Decimal,
    /// Gross profit: sale totals minus purchase totals (not lot-based).
    pub profit: Decimal,
    /// Number of purchase bills in the window.
    pub purchase_count: u64,
    /// Number of sale bills in the window.
    pub sale_count: u64,
    /// Twelve month-of-year buckets in fiscal order, April first.
    pub monthly: Vec<MonthlyTotals>,
    /// Per-material totals and profit.
    pub material_wise: Vec<MaterialTotals>,
    /// Top five parties by combined bill total.
    pub top_parties: Vec<PartyTotal>,
    /// Purchase bills per effective status.
    pub purchase_status: StatusCounts,
    /// Sale bills per effective status.
    pub sale_status: StatusCounts,
}

/// One month-of-year bucket.
///
/// Buckets group by calendar month independent of year, so bills from the
/// same month of different years share a bucket in a multi-year window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyTotals {
    /// Month label ("Apr" through "Mar").
    pub month: String,
    /// Purchase total for the month.
    pub purchases: Decimal,
    /// Sale total for the month.
    pub sales: Decimal,
}

/// Totals for one material type. Grouping is by the exact, case-sensitive
/// material string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialTotals {
    /// Material name.
    pub material: String,
    /// Purchase total for the material.
    pub purchases: Decimal,
    /// Sale total for the material.
    pub sales: Decimal,
    /// Sale total minus purchase total.
    pub profit: Decimal,
}

/// Combined bill total for one party.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyTotal {
    /// Party name.
    pub name: String,
    /// Combined purchase and sale total.
    pub total: Decimal,
}

/// Bill counts per effective status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatusCounts {
    /// Fully paid bills.
    pub paid: u64,
    /// Partly paid bills.
    pub partial: u64,
    /// Unpaid bills.
    pub pending: u64,
    /// Bills past due with a balance.
    pub overdue: u64,
}
