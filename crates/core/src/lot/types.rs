//! Lot types and derived metrics.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use scraptally_shared::types::{LotEntryId, LotId, OwnerId, TransactionId};

use crate::gst::round2;

/// Sale progress of a lot, derived from its weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LotStatus {
    /// Nothing sold yet.
    Unsold,
    /// Some, but not all, of the purchased weight sold.
    Partial,
    /// Sold weight covers (or exceeds) the purchased weight.
    #[serde(rename = "Fully Sold")]
    FullySold,
}

impl LotStatus {
    /// Display string for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unsold => "Unsold",
            Self::Partial => "Partial",
            Self::FullySold => "Fully Sold",
        }
    }

    /// Parses a display string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Unsold" => Some(Self::Unsold),
            "Partial" => Some(Self::Partial),
            "Fully Sold" => Some(Self::FullySold),
            _ => None,
        }
    }
}

/// A weighted allocation of one bill to a lot.
///
/// The entry carries its own weight, rate and amount, independent of the
/// referenced bill's stored values, so a bill can be split across lots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotEntry {
    /// Unique identifier of the allocation.
    pub id: LotEntryId,
    /// The allocated bill.
    pub transaction_id: TransactionId,
    /// Weight taken from the bill for this lot.
    pub weight: Decimal,
    /// Rate applied to this allocation.
    pub rate: Decimal,
    /// Amount of this allocation.
    pub amount: Decimal,
}

/// Input for one allocation.
#[derive(Debug, Clone, Deserialize)]
pub struct NewLotEntry {
    /// The bill to allocate.
    pub transaction_id: TransactionId,
    /// Weight taken from the bill.
    pub weight: Decimal,
    /// Rate applied.
    pub rate: Decimal,
    /// Allocation amount.
    pub amount: Decimal,
}

/// A material lot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lot {
    /// Unique identifier.
    pub id: LotId,
    /// Lot number as used by the trader.
    pub lot_number: String,
    /// Material in this lot.
    pub material_type: String,
    /// Financial year the lot belongs to.
    pub financial_year: String,
    /// Free-text description.
    pub description: String,
    /// Purchase allocations (incoming bills).
    pub purchases: Vec<LotEntry>,
    /// Sale allocations (outgoing bills).
    pub sales: Vec<LotEntry>,
    /// Owning user.
    pub owner: OwnerId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Derived lot figures, computed from the entry lists on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotMetrics {
    /// Sum of purchase allocation amounts.
    pub total_purchase_cost: Decimal,
    /// Sum of purchase allocation weights.
    pub total_purchase_weight: Decimal,
    /// Sum of sale allocation amounts.
    pub total_sale_revenue: Decimal,
    /// Sum of sale allocation weights.
    pub total_sale_weight: Decimal,
    /// Revenue minus cost.
    pub profit: Decimal,
    /// Profit as a percentage of cost; zero when there is no cost.
    pub profit_percent: Decimal,
    /// Sold weight minus purchased weight. Positive means more weight went
    /// out than came in - a data-quality signal, not clamped.
    pub weight_difference: Decimal,
    /// Sale progress.
    pub status: LotStatus,
}

impl Lot {
    /// Computes the derived figures from the current entry lists.
    #[must_use]
    pub fn metrics(&self) -> LotMetrics {
        let total_purchase_cost: Decimal = self.purchases.iter().map(|e| e.amount).sum();
        let total_purchase_weight: Decimal = self.purchases.iter().map(|e| e.weight).sum();
        let total_sale_revenue: Decimal = self.sales.iter().map(|e| e.amount).sum();
        let total_sale_weight: Decimal = self.sales.iter().map(|e| e.weight).sum();

        let profit = total_sale_revenue - total_purchase_cost;
        let profit_percent = if total_purchase_cost.is_zero() {
            Decimal::ZERO
        } else {
            round2(profit / total_purchase_cost * Decimal::ONE_HUNDRED)
        };

        let status = if total_sale_weight.is_zero() {
            LotStatus::Unsold
        } else if total_sale_weight < total_purchase_weight {
            LotStatus::Partial
        } else {
            LotStatus::FullySold
        };

        LotMetrics {
            total_purchase_cost,
            total_purchase_weight,
            total_sale_revenue,
            total_sale_weight,
            profit,
            profit_percent,
            weight_difference: total_sale_weight - total_purchase_weight,
            status,
        }
    }
}

/// Input for creating a lot.
#[derive(Debug, Clone)]
pub struct CreateLot {
    /// Lot number.
    pub lot_number: String,
    /// Material in the lot.
    pub material_type: String,
    /// Free-text description.
    pub description: String,
    /// Initial purchase allocations.
    pub purchases: Vec<NewLotEntry>,
    /// Initial sale allocations.
    pub sales: Vec<NewLotEntry>,
}

/// Partial update of a lot. A provided entry list replaces the stored one
/// wholesale.
#[derive(Debug, Clone, Default)]
pub struct UpdateLot {
    /// New lot number.
    pub lot_number: Option<String>,
    /// New material.
    pub material_type: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// Replacement purchase allocations.
    pub purchases: Option<Vec<NewLotEntry>>,
    /// Replacement sale allocations.
    pub sales: Option<Vec<NewLotEntry>>,
}

/// Repository-level filter for lot queries. The status filter is applied
/// after fetching, not here.
#[derive(Debug, Clone, Default)]
pub struct LotFilter {
    /// Exact financial year label.
    pub financial_year: Option<String>,
    /// Case-insensitive substring of the material type.
    pub material_type: Option<String>,
}
