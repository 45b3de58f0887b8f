//! Bill record types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use scraptally_shared::types::{OwnerId, PartyId, TransactionId};

use crate::gst::{GstBreakdown, GstType};
use crate::payment::{self, EffectiveStatus, Payment, PaymentStatus};

/// Economic direction of a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Incoming material, money owed to a supplier.
    Purchase,
    /// Outgoing material, money owed by a customer.
    Sale,
}

impl TransactionKind {
    /// Wire string for this direction.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Sale => "sale",
        }
    }
}

/// Unit the bill weight was recorded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    /// Kilograms.
    #[default]
    Kg,
    /// Metric tons.
    Ton,
    /// Quintals (100 kg).
    Quintal,
}

impl WeightUnit {
    /// Wire string for this unit.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kg => "kg",
            Self::Ton => "ton",
            Self::Quintal => "quintal",
        }
    }
}

/// Party details embedded into a bill by the persistence collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyRef {
    /// Party id.
    pub id: PartyId,
    /// Party name.
    pub name: String,
    /// Party mobile number.
    pub mobile: String,
    /// Party GST registration number.
    pub gst_number: String,
}

/// Reference to a stored bill attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    /// Public URL of the stored file.
    pub url: String,
    /// Storage id used to release the object.
    pub storage_id: String,
}

/// A purchase or sale bill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Purchase or sale.
    pub kind: TransactionKind,
    /// Bill number as printed on the document.
    pub bill_number: String,
    /// The supplier or customer.
    pub party: PartyRef,
    /// Material traded (free text, e.g. "Iron", "Copper").
    pub material_type: String,
    /// Weight of material on the bill.
    pub weight: Decimal,
    /// Unit the weight was recorded in.
    pub weight_unit: WeightUnit,
    /// Rate per kilogram.
    pub rate_per_kg: Decimal,
    /// Bill value before tax.
    pub taxable_amount: Decimal,
    /// GST regime.
    pub gst_type: GstType,
    /// GST rate, e.g. 18 for 18%.
    pub gst_percent: Decimal,
    /// Central GST component.
    pub cgst_amount: Decimal,
    /// State GST component.
    pub sgst_amount: Decimal,
    /// Integrated GST component.
    pub igst_amount: Decimal,
    /// Total tax on the bill.
    pub total_gst_amount: Decimal,
    /// Taxable amount plus total tax.
    pub total_amount: Decimal,
    /// Bill date.
    pub bill_date: DateTime<Utc>,
    /// Optional payment due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Financial year label derived from the bill date.
    pub financial_year: String,
    /// Attached bill document, if any.
    pub attachment: Option<AttachmentRef>,
    /// Payments recorded against this bill, in insertion order.
    pub payments: Vec<Payment>,
    /// Free-text notes.
    pub notes: String,
    /// Owning user.
    pub owner: OwnerId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Sum of payments recorded so far.
    #[must_use]
    pub fn paid_amount(&self) -> Decimal {
        payment::paid_amount(&self.payments)
    }

    /// Outstanding balance. Negative when overpaid.
    #[must_use]
    pub fn pending_amount(&self) -> Decimal {
        payment::pending_amount(self.total_amount, &self.payments)
    }

    /// Raw settlement classification.
    #[must_use]
    pub fn payment_status(&self) -> PaymentStatus {
        payment::payment_status(self.total_amount, self.paid_amount())
    }

    /// Whether the bill is past due with a balance outstanding.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        payment::is_overdue(self.due_date, self.pending_amount(), now)
    }

    /// Settlement status as displayed and filtered on.
    #[must_use]
    pub fn effective_status(&self, now: DateTime<Utc>) -> EffectiveStatus {
        payment::effective_status(self.payment_status(), self.is_overdue(now))
    }

    /// Overwrites the stored tax figures from a calculator result.
    pub fn apply_gst(&mut self, gst: GstBreakdown) {
        self.taxable_amount = gst.taxable_amount;
        self.cgst_amount = gst.cgst_amount;
        self.sgst_amount = gst.sgst_amount;
        self.igst_amount = gst.igst_amount;
        self.total_gst_amount = gst.total_gst_amount;
        self.total_amount = gst.total_amount;
    }
}

/// An attachment file handed in with a create or update.
#[derive(Debug, Clone)]
pub struct AttachmentUpload {
    /// Original filename.
    pub filename: String,
    /// MIME type.
    pub content_type: String,
    /// File contents.
    pub data: Vec<u8>,
}

/// Input for creating a bill.
#[derive(Debug, Clone)]
pub struct CreateTransaction {
    /// Purchase or sale.
    pub kind: TransactionKind,
    /// Bill number.
    pub bill_number: String,
    /// The supplier or customer.
    pub party_id: PartyId,
    /// Material traded.
    pub material_type: String,
    /// Weight of material.
    pub weight: Decimal,
    /// Unit the weight was recorded in.
    pub weight_unit: WeightUnit,
    /// Rate per kilogram.
    pub rate_per_kg: Decimal,
    /// Bill value before tax.
    pub taxable_amount: Decimal,
    /// GST regime.
    pub gst_type: GstType,
    /// GST rate.
    pub gst_percent: Decimal,
    /// Bill date.
    pub bill_date: DateTime<Utc>,
    /// Optional payment due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Free-text notes.
    pub notes: String,
    /// Bill document to upload.
    pub attachment: Option<AttachmentUpload>,
}

/// Partial update of a bill. Absent fields keep their stored values.
#[derive(Debug, Clone, Default)]
pub struct UpdateTransaction {
    /// New bill number.
    pub bill_number: Option<String>,
    /// New party.
    pub party_id: Option<PartyId>,
    /// New material.
    pub material_type: Option<String>,
    /// New weight.
    pub weight: Option<Decimal>,
    /// New weight unit.
    pub weight_unit: Option<WeightUnit>,
    /// New rate per kilogram.
    pub rate_per_kg: Option<Decimal>,
    /// New taxable amount. Triggers a full GST recomputation.
    pub taxable_amount: Option<Decimal>,
    /// New GST regime. Triggers a full GST recomputation.
    pub gst_type: Option<GstType>,
    /// New GST rate. Triggers a full GST recomputation.
    pub gst_percent: Option<Decimal>,
    /// New bill date. Re-derives the financial year.
    pub bill_date: Option<DateTime<Utc>>,
    /// New due date.
    pub due_date: Option<DateTime<Utc>>,
    /// New notes.
    pub notes: Option<String>,
    /// Replacement bill document; the old object is released best-effort.
    pub attachment: Option<AttachmentUpload>,
}

/// Repository-level filter for bill queries. The effective-status filter
/// is applied after fetching, not here.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Restrict to one direction.
    pub kind: Option<TransactionKind>,
    /// Exact financial year label.
    pub financial_year: Option<String>,
    /// Exact party id.
    pub party: Option<PartyId>,
    /// Case-insensitive substring of the bill number.
    pub bill_number: Option<String>,
    /// Bills dated on or after this instant.
    pub date_from: Option<DateTime<Utc>>,
    /// Bills dated on or before this instant.
    pub date_to: Option<DateTime<Utc>>,
}
