//! Lot reconciliation.
//!
//! A lot groups weighted allocations of purchase and sale bills for one
//! material batch, yielding profit and weight reconciliation independent
//! of per-bill payment status.

mod error;
mod service;
mod types;

pub use error::LotError;
pub use service::{LotRepository, LotService};
pub use types::{CreateLot, Lot, LotEntry, LotFilter, LotMetrics, LotStatus, NewLotEntry, UpdateLot};
