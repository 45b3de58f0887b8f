//! Per-bill payment ledger.
//!
//! Payments live inside their bill; everything else here (paid, pending,
//! status, overdue) is derived from the list on demand and never stored.

mod ledger;
mod types;

pub use ledger::{
    EffectiveStatus, PaymentStatus, effective_status, is_overdue, paid_amount, payment_status,
    pending_amount,
};
pub use types::{NewPayment, Payment, PaymentMode};
