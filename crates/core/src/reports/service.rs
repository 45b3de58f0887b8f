//! Report row generation.

use chrono::{DateTime, Utc};

use super::error::ReportError;
use crate::transaction::Transaction;

/// Column headers for the bill export, in output order.
const TRANSACTION_HEADERS: [&str; 16] = [
    "Bill Number",
    "Party Name",
    "Party Mobile",
    "GST Number",
    "Material Type",
    "Weight",
    "Weight Unit",
    "Rate Per Kg",
    "Total Amount",
    "Paid Amount",
    "Pending Amount",
    "Status",
    "Bill Date",
    "Due Date",
    "Financial Year",
    "Notes",
];

/// An in-memory report: ordered headers plus one row of field values per
/// record.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    /// Column headers in output order.
    pub headers: Vec<String>,
    /// One row per record, values aligned with `headers`.
    pub rows: Vec<Vec<String>>,
}

impl ReportDocument {
    /// Renders the document as CSV into a writer. Field quoting is handled
    /// by the `csv` crate.
    ///
    /// # Errors
    ///
    /// Returns an error when the writer fails.
    pub fn write_csv<W: std::io::Write>(&self, writer: W) -> Result<(), ReportError> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.headers)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Renders the document as a CSV string.
    ///
    /// # Errors
    ///
    /// Returns an error when rendering fails.
    pub fn to_csv_string(&self) -> Result<String, ReportError> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        String::from_utf8(buffer).map_err(|_| ReportError::Utf8)
    }
}

/// Service for building report rows.
pub struct ReportService;

impl ReportService {
    /// Builds the bill export for already-fetched purchases or sales.
    ///
    /// Dates are formatted `DD/MM/YYYY`; the status column carries the
    /// effective status at `now`.
    #[must_use]
    pub fn transaction_report(transactions: &[Transaction], now: DateTime<Utc>) -> ReportDocument {
        let rows = transactions
            .iter()
            .map(|t| {
                vec![
                    t.bill_number.clone(),
                    t.party.name.clone(),
                    t.party.mobile.clone(),
                    t.party.gst_number.clone(),
                    t.material_type.clone(),
                    t.weight.to_string(),
                    t.weight_unit.as_str().to_string(),
                    t.rate_per_kg.to_string(),
                    t.total_amount.to_string(),
                    t.paid_amount().to_string(),
                    t.pending_amount().to_string(),
                    t.effective_status(now).to_string(),
                    t.bill_date.format("%d/%m/%Y").to_string(),
                    t.due_date
                        .map(|d| d.format("%d/%m/%Y").to_string())
                        .unwrap_or_default(),
                    t.financial_year.clone(),
                    t.notes.clone(),
                ]
            })
            .collect();

        ReportDocument {
            headers: TRANSACTION_HEADERS.iter().map(ToString::to_string).collect(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gst::GstType;
    use crate::payment::{Payment, PaymentMode};
    use crate::transaction::{PartyRef, TransactionKind, WeightUnit};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use scraptally_shared::types::{OwnerId, PartyId, PaymentId, TransactionId};

    fn bill(party_name: &str, notes: &str) -> Transaction {
        let bill_date = Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap();
        Transaction {
            id: TransactionId::new(),
            kind: TransactionKind::Purchase,
            bill_number: "INV-001".to_string(),
            party: PartyRef {
                id: PartyId::new(),
                name: party_name.to_string(),
                mobile: "9000000000".to_string(),
                gst_number: "27AAPFU0939F1ZV".to_string(),
            },
            material_type: "Iron".to_string(),
            weight: dec!(100),
            weight_unit: WeightUnit::Kg,
            rate_per_kg: dec!(50),
            taxable_amount: dec!(5000),
            gst_type: GstType::CgstSgst,
            gst_percent: dec!(18),
            cgst_amount: dec!(450.00),
            sgst_amount: dec!(450.00),
            igst_amount: dec!(0),
            total_gst_amount: dec!(900.00),
            total_amount: dec!(5900.00),
            bill_date,
            due_date: None,
            financial_year: "2025-2026".to_string(),
            attachment: None,
            payments: vec![Payment {
                id: PaymentId::new(),
                amount: dec!(3000),
                payment_date: bill_date,
                mode: PaymentMode::Bank,
                note: String::new(),
                reference: String::new(),
                created_at: bill_date,
            }],
            notes: notes.to_string(),
            owner: OwnerId::new(),
            created_at: bill_date,
            updated_at: bill_date,
        }
    }

    #[test]
    fn test_headers_in_export_order() {
        let report = ReportService::transaction_report(&[], Utc::now());
        assert_eq!(report.headers.first().unwrap(), "Bill Number");
        assert_eq!(report.headers.last().unwrap(), "Notes");
        assert_eq!(report.headers.len(), 16);
        assert!(report.rows.is_empty());
    }

    #[test]
    fn test_row_values_and_date_format() {
        let report =
            ReportService::transaction_report(&[bill("Sharma Metals", "")], Utc::now());
        let row = &report.rows[0];

        assert_eq!(row[0], "INV-001");
        assert_eq!(row[1], "Sharma Metals");
        assert_eq!(row[3], "27AAPFU0939F1ZV");
        assert_eq!(row[6], "kg");
        assert_eq!(row[8], "5900.00");
        assert_eq!(row[9], "3000");
        assert_eq!(row[10], "2900.00");
        assert_eq!(row[11], "Partial");
        assert_eq!(row[12], "15/06/2025");
        assert_eq!(row[13], "");
        assert_eq!(row[14], "2025-2026");
    }

    #[test]
    fn test_csv_quotes_fields_containing_the_delimiter() {
        let report = ReportService::transaction_report(
            &[bill("Sharma, Metals & Co", "weighbridge slip, gate pass")],
            Utc::now(),
        );
        let csv = report.to_csv_string().unwrap();

        assert!(csv.starts_with("Bill Number,Party Name,"));
        assert!(csv.contains("\"Sharma, Metals & Co\""));
        assert!(csv.contains("\"weighbridge slip, gate pass\""));
    }

    #[test]
    fn test_empty_report_is_header_line_only() {
        let report = ReportService::transaction_report(&[], Utc::now());
        let csv = report.to_csv_string().unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
