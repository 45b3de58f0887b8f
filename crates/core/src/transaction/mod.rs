//! Purchase and sale bill lifecycle.
//!
//! Purchases and sales are structurally identical and differ only in
//! economic direction, so one record type carries a [`TransactionKind`]
//! tag. GST figures and the financial year are derived at write time;
//! payment figures are derived at read time.

mod error;
mod service;
mod types;

pub use error::TransactionError;
pub use service::{TransactionRepository, TransactionService};
pub use types::{
    AttachmentRef, AttachmentUpload, CreateTransaction, PartyRef, Transaction, TransactionFilter,
    TransactionKind, UpdateTransaction, WeightUnit,
};
