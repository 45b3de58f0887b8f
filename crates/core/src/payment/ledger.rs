//! Derived payment figures for one bill.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::Payment;

/// Raw settlement classification of a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Paid in full (or overpaid).
    Paid,
    /// Partly paid.
    Partial,
    /// Nothing paid yet.
    Pending,
}

/// Settlement status as displayed and filtered on: overdue takes
/// precedence over the raw classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectiveStatus {
    /// Paid in full.
    Paid,
    /// Partly paid.
    Partial,
    /// Nothing paid yet.
    Pending,
    /// Past its due date with an outstanding balance.
    Overdue,
}

impl EffectiveStatus {
    /// Display string for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Partial => "Partial",
            Self::Pending => "Pending",
            Self::Overdue => "Overdue",
        }
    }

    /// Parses a display string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Paid" => Some(Self::Paid),
            "Partial" => Some(Self::Partial),
            "Pending" => Some(Self::Pending),
            "Overdue" => Some(Self::Overdue),
            _ => None,
        }
    }
}

impl std::fmt::Display for EffectiveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sum of all payment amounts on a bill.
#[must_use]
pub fn paid_amount(payments: &[Payment]) -> Decimal {
    payments.iter().map(|p| p.amount).sum()
}

/// Outstanding balance. Negative when overpaid; not clamped.
#[must_use]
pub fn pending_amount(total_amount: Decimal, payments: &[Payment]) -> Decimal {
    total_amount - paid_amount(payments)
}

/// Classifies a bill from its total and the amount paid so far.
#[must_use]
pub fn payment_status(total_amount: Decimal, paid: Decimal) -> PaymentStatus {
    if paid >= total_amount {
        PaymentStatus::Paid
    } else if paid > Decimal::ZERO {
        PaymentStatus::Partial
    } else {
        PaymentStatus::Pending
    }
}

/// A bill is overdue when its due date has passed and a balance remains.
/// A fully paid bill is never overdue regardless of date.
#[must_use]
pub fn is_overdue(due_date: Option<DateTime<Utc>>, pending: Decimal, now: DateTime<Utc>) -> bool {
    match due_date {
        Some(due) => due < now && pending > Decimal::ZERO,
        None => false,
    }
}

/// Combines the raw classification with overdue detection.
#[must_use]
pub fn effective_status(status: PaymentStatus, overdue: bool) -> EffectiveStatus {
    if overdue {
        return EffectiveStatus::Overdue;
    }
    match status {
        PaymentStatus::Paid => EffectiveStatus::Paid,
        PaymentStatus::Partial => EffectiveStatus::Partial,
        PaymentStatus::Pending => EffectiveStatus::Pending,
    }
}
