//! Dashboard aggregation.
//!
//! Cross-cuts one owner's bills for a period into totals, monthly series,
//! material-wise and party-wise summaries, and status counts. Read-only:
//! everything is computed over a snapshot fetched once per request.

mod service;
mod types;

pub use service::DashboardService;
pub use types::{
    DashboardSummary, MaterialTotals, MonthlyTotals, PartyTotal, StatusCounts,
};
