//! Financial year resolution.
//!
//! Indian accounting periods run April 1 to March 31 and are labeled by
//! both calendar years, e.g. `"2025-2026"`.

mod year;

pub use year::{
    FiscalError, FyRange, financial_year, financial_year_range, financial_years_since,
};
