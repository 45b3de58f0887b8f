//! Report rows for CSV export.
//!
//! The core produces ordered header/row data; rendering to delimited text
//! (with quoting) is delegated to the `csv` crate.

mod error;
mod service;

pub use error::ReportError;
pub use service::{ReportDocument, ReportService};
