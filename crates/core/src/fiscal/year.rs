//! Financial year label derivation and ranges.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use thiserror::Error;

use scraptally_shared::AppError;

/// Errors from financial year label handling.
#[derive(Debug, Error)]
pub enum FiscalError {
    /// Label is not of the form `"YYYY-YYYY+1"`.
    #[error("invalid financial year label: {0}")]
    InvalidLabel(String),
}

impl From<FiscalError> for AppError {
    fn from(err: FiscalError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Start and end instants of a financial year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FyRange {
    /// April 1, 00:00:00.000 UTC of the label's first year.
    pub start: DateTime<Utc>,
    /// March 31, 23:59:59.999 UTC of the label's second year.
    pub end: DateTime<Utc>,
}

/// Returns the financial year label for a date.
///
/// A date in May 2025 maps to `"2025-2026"`; a date in January 2026 also
/// maps to `"2025-2026"`. The cutover is April 1.
#[must_use]
pub fn financial_year(date: NaiveDate) -> String {
    let year = date.year();
    // 0-indexed month, April = 3
    if date.month0() >= 3 {
        format!("{year}-{}", year + 1)
    } else {
        format!("{}-{year}", year - 1)
    }
}

/// Returns the start and end instants for a financial year label.
///
/// # Errors
///
/// Returns [`FiscalError::InvalidLabel`] when the label is not two
/// consecutive calendar years joined by a dash.
pub fn financial_year_range(label: &str) -> Result<FyRange, FiscalError> {
    let invalid = || FiscalError::InvalidLabel(label.to_string());

    let (first, second) = label.split_once('-').ok_or_else(invalid)?;
    let start_year: i32 = first.parse().map_err(|_| invalid())?;
    let end_year: i32 = second.parse().map_err(|_| invalid())?;
    if end_year != start_year + 1 {
        return Err(invalid());
    }

    let start = NaiveDate::from_ymd_opt(start_year, 4, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(invalid)?;
    let end = NaiveDate::from_ymd_opt(end_year, 3, 31)
        .and_then(|d| d.and_hms_milli_opt(23, 59, 59, 999))
        .ok_or_else(invalid)?;

    Ok(FyRange {
        start: start.and_utc(),
        end: end.and_utc(),
    })
}

/// Lists every financial year label from `from_year` up to the label
/// containing `today`, most recent first.
#[must_use]
pub fn financial_years_since(from_year: i32, today: NaiveDate) -> Vec<String> {
    let current = financial_year(today);
    let current_start: i32 = current
        .split_once('-')
        .and_then(|(first, _)| first.parse().ok())
        .unwrap_or(from_year);

    (from_year..=current_start)
        .rev()
        .map(|y| format!("{y}-{}", y + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(date(2025, 3, 31), "2024-2025")]
    #[case(date(2025, 4, 1), "2025-2026")]
    #[case(date(2025, 5, 15), "2025-2026")]
    #[case(date(2026, 1, 10), "2025-2026")]
    #[case(date(2024, 2, 29), "2023-2024")]
    #[case(date(2025, 12, 31), "2025-2026")]
    fn test_financial_year_labels(#[case] input: NaiveDate, #[case] expected: &str) {
        assert_eq!(financial_year(input), expected);
    }

    #[test]
    fn test_range_boundaries() {
        let range = financial_year_range("2025-2026").unwrap();
        assert_eq!(
            range.start,
            date(2025, 4, 1).and_hms_opt(0, 0, 0).unwrap().and_utc()
        );
        assert_eq!(
            range.end,
            date(2026, 3, 31)
                .and_hms_milli_opt(23, 59, 59, 999)
                .unwrap()
                .and_utc()
        );
    }

    #[rstest]
    #[case("2025")]
    #[case("2025-2027")]
    #[case("abcd-efgh")]
    #[case("")]
    fn test_range_rejects_malformed_labels(#[case] label: &str) {
        assert!(matches!(
            financial_year_range(label),
            Err(FiscalError::InvalidLabel(_))
        ));
    }

    #[test]
    fn test_years_since_descending_inclusive() {
        let years = financial_years_since(2022, date(2025, 8, 5));
        assert_eq!(years, vec!["2025-2026", "2024-2025", "2023-2024", "2022-2023"]);
    }

    #[test]
    fn test_years_since_before_april() {
        // January 2025 is still FY 2024-2025.
        let years = financial_years_since(2023, date(2025, 1, 15));
        assert_eq!(years, vec!["2024-2025", "2023-2024"]);
    }

    #[test]
    fn test_years_since_future_start_is_empty() {
        assert!(financial_years_since(2030, date(2025, 8, 5)).is_empty());
    }

    proptest! {
        /// Any date lies inside the range of its own label.
        #[test]
        fn prop_date_within_own_label_range(
            year in 1990i32..2100,
            ordinal in 1u32..=365,
        ) {
            let d = NaiveDate::from_yo_opt(year, ordinal).unwrap();
            let label = financial_year(d);
            let range = financial_year_range(&label).unwrap();
            let instant = d.and_hms_opt(12, 0, 0).unwrap().and_utc();
            prop_assert!(instant >= range.start);
            prop_assert!(instant <= range.end);
        }

        /// Labels always name two consecutive years.
        #[test]
        fn prop_label_years_consecutive(
            year in 1990i32..2100,
            ordinal in 1u32..=365,
        ) {
            let d = NaiveDate::from_yo_opt(year, ordinal).unwrap();
            let label = financial_year(d);
            let (a, b) = label.split_once('-').unwrap();
            let a: i32 = a.parse().unwrap();
            let b: i32 = b.parse().unwrap();
            prop_assert_eq!(b, a + 1);
        }
    }
}
