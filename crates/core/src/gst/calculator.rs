//! GST calculator.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// GST regime applied to a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GstType {
    /// No GST applied.
    #[default]
    #[serde(rename = "none")]
    None,
    /// Interstate: the full tax is IGST.
    #[serde(rename = "IGST")]
    Igst,
    /// Intrastate: the tax is split into equal CGST and SGST halves.
    #[serde(rename = "CGST_SGST")]
    CgstSgst,
}

impl GstType {
    /// Wire string for this regime.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Igst => "IGST",
            Self::CgstSgst => "CGST_SGST",
        }
    }

    /// Parses a wire string. Unknown values return `None`; callers treat
    /// them as [`GstType::None`].
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Self::None),
            "IGST" => Some(Self::Igst),
            "CGST_SGST" => Some(Self::CgstSgst),
            _ => None,
        }
    }
}

/// Tax breakdown derived from a taxable amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GstBreakdown {
    /// Bill value before tax.
    pub taxable_amount: Decimal,
    /// Central GST component (intrastate only).
    pub cgst_amount: Decimal,
    /// State GST component (intrastate only).
    pub sgst_amount: Decimal,
    /// Integrated GST component (interstate only).
    pub igst_amount: Decimal,
    /// Total tax on the bill.
    pub total_gst_amount: Decimal,
    /// Taxable amount plus total tax.
    pub total_amount: Decimal,
}

impl GstBreakdown {
    fn untaxed(taxable: Decimal) -> Self {
        Self {
            taxable_amount: taxable,
            cgst_amount: Decimal::ZERO,
            sgst_amount: Decimal::ZERO,
            igst_amount: Decimal::ZERO,
            total_gst_amount: Decimal::ZERO,
            total_amount: taxable,
        }
    }
}

/// Rounds to two decimal places, half away from zero.
pub(crate) fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Calculates the GST breakdown for a taxable amount.
///
/// Each tax component is rounded to two decimals independently. For the
/// CGST/SGST split, `total_amount` adds the unhalved total tax, so
/// `cgst_amount + sgst_amount` may differ from `total_gst_amount` by 0.01;
/// downstream totals rely on the unhalved figure and the mismatch is kept.
#[must_use]
pub fn calculate(taxable: Decimal, gst_type: GstType, percent: Decimal) -> GstBreakdown {
    if gst_type == GstType::None || percent.is_zero() {
        return GstBreakdown::untaxed(taxable);
    }

    let total_gst = round2(taxable * percent / Decimal::ONE_HUNDRED);

    match gst_type {
        GstType::Igst => GstBreakdown {
            taxable_amount: taxable,
            cgst_amount: Decimal::ZERO,
            sgst_amount: Decimal::ZERO,
            igst_amount: total_gst,
            total_gst_amount: total_gst,
            total_amount: taxable + total_gst,
        },
        GstType::CgstSgst => {
            let half = round2(total_gst / Decimal::TWO);
            GstBreakdown {
                taxable_amount: taxable,
                cgst_amount: half,
                sgst_amount: half,
                igst_amount: Decimal::ZERO,
                total_gst_amount: total_gst,
                total_amount: taxable + total_gst,
            }
        }
        GstType::None => GstBreakdown::untaxed(taxable),
    }
}
