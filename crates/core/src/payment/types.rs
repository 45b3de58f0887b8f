//! Payment entry types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use scraptally_shared::types::PaymentId;

/// How a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentMode {
    /// Cash payment.
    #[default]
    Cash,
    /// Bank transfer.
    Bank,
    /// UPI transfer.
    #[serde(rename = "UPI")]
    Upi,
    /// Cheque.
    Cheque,
}

impl PaymentMode {
    /// Wire string for this mode.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Bank => "Bank",
            Self::Upi => "UPI",
            Self::Cheque => "Cheque",
        }
    }

    /// Parses a wire string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Cash" => Some(Self::Cash),
            "Bank" => Some(Self::Bank),
            "UPI" => Some(Self::Upi),
            "Cheque" => Some(Self::Cheque),
            _ => None,
        }
    }
}

/// A payment recorded against one bill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier.
    pub id: PaymentId,
    /// Amount paid. Always positive.
    pub amount: Decimal,
    /// When the payment was made.
    pub payment_date: DateTime<Utc>,
    /// Payment mode.
    pub mode: PaymentMode,
    /// Free-text note.
    pub note: String,
    /// External reference (cheque number, UPI id, ...).
    pub reference: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for recording a payment.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPayment {
    /// Amount paid. Must be positive.
    pub amount: Decimal,
    /// When the payment was made; defaults to the moment of recording.
    pub payment_date: Option<DateTime<Utc>>,
    /// Payment mode.
    #[serde(default)]
    pub mode: PaymentMode,
    /// Free-text note.
    #[serde(default)]
    pub note: String,
    /// External reference.
    #[serde(default)]
    pub reference: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_mode_roundtrip() {
        for mode in [
            PaymentMode::Cash,
            PaymentMode::Bank,
            PaymentMode::Upi,
            PaymentMode::Cheque,
        ] {
            assert_eq!(PaymentMode::parse(mode.as_str()), Some(mode));
        }
    }

    #[test]
    fn test_payment_mode_unknown() {
        assert_eq!(PaymentMode::parse("Barter"), None);
    }

    #[test]
    fn test_default_mode_is_cash() {
        assert_eq!(PaymentMode::default(), PaymentMode::Cash);
    }
}
