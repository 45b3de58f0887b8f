//! Bill service implementation.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use scraptally_shared::types::{OwnerId, PageRequest, PageResponse, PartyId, PaymentId, TransactionId};

use super::error::TransactionError;
use super::types::{
    AttachmentRef, AttachmentUpload, CreateTransaction, PartyRef, Transaction, TransactionFilter,
    UpdateTransaction,
};
use crate::fiscal;
use crate::gst;
use crate::payment::{EffectiveStatus, NewPayment, Payment};
use crate::storage::{AttachmentStore, ObjectStore};

/// Repository trait for bill persistence.
///
/// This trait is implemented by the db layer to provide actual database
/// operations. `insert` and `save` persist the record as handed over;
/// `list` returns bills ordered by bill date descending.
pub trait TransactionRepository: Send + Sync {
    /// Persist a new bill.
    fn insert(
        &self,
        transaction: Transaction,
    ) -> impl std::future::Future<Output = Result<Transaction, TransactionError>> + Send;

    /// Find a bill by id, scoped to its owner.
    fn find_by_id(
        &self,
        id: TransactionId,
        owner: OwnerId,
    ) -> impl std::future::Future<Output = Result<Option<Transaction>, TransactionError>> + Send;

    /// Persist changes to an existing bill.
    fn save(
        &self,
        transaction: Transaction,
    ) -> impl std::future::Future<Output = Result<Transaction, TransactionError>> + Send;

    /// Delete a bill by id. Returns whether a record was removed.
    fn delete(
        &self,
        id: TransactionId,
        owner: OwnerId,
    ) -> impl std::future::Future<Output = Result<bool, TransactionError>> + Send;

    /// List bills matching a filter, ordered by bill date descending.
    fn list(
        &self,
        owner: OwnerId,
        filter: &TransactionFilter,
        offset: u64,
        limit: u64,
    ) -> impl std::future::Future<Output = Result<Vec<Transaction>, TransactionError>> + Send;

    /// Count bills matching a filter.
    fn count(
        &self,
        owner: OwnerId,
        filter: &TransactionFilter,
    ) -> impl std::future::Future<Output = Result<u64, TransactionError>> + Send;

    /// Resolve an embedded party reference, scoped to its owner.
    fn party_ref(
        &self,
        party_id: PartyId,
        owner: OwnerId,
    ) -> impl std::future::Future<Output = Result<Option<PartyRef>, TransactionError>> + Send;
}

/// Bill service for purchases and sales.
pub struct TransactionService<R: TransactionRepository, S: AttachmentStore> {
    repo: Arc<R>,
    store: Arc<S>,
}

fn non_negative(value: Decimal, field: &'static str) -> Result<(), TransactionError> {
    if value < Decimal::ZERO {
        return Err(TransactionError::NegativeAmount(field));
    }
    Ok(())
}

impl<R: TransactionRepository, S: AttachmentStore> TransactionService<R, S> {
    /// Create a new bill service.
    #[must_use]
    pub fn new(repo: Arc<R>, store: Arc<S>) -> Self {
        Self { repo, store }
    }

    /// Create a bill.
    ///
    /// Derives the financial year from the bill date and the GST figures
    /// from the taxable amount, regime and rate. A supplied attachment is
    /// uploaded first; an upload failure aborts the create.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is blank, an amount is
    /// negative, the party does not exist, or a collaborator fails.
    pub async fn create(
        &self,
        owner: OwnerId,
        input: CreateTransaction,
    ) -> Result<Transaction, TransactionError> {
        if input.bill_number.trim().is_empty() {
            return Err(TransactionError::MissingField("billNumber"));
        }
        if input.material_type.trim().is_empty() {
            return Err(TransactionError::MissingField("materialType"));
        }
        non_negative(input.weight, "weight")?;
        non_negative(input.rate_per_kg, "ratePerKg")?;
        non_negative(input.taxable_amount, "taxableAmount")?;

        let party = self
            .repo
            .party_ref(input.party_id, owner)
            .await?
            .ok_or(TransactionError::PartyNotFound(input.party_id))?;

        let id = TransactionId::new();
        let financial_year = fiscal::financial_year(input.bill_date.date_naive());
        let breakdown = gst::calculate(input.taxable_amount, input.gst_type, input.gst_percent);

        let attachment = match input.attachment {
            Some(upload) => Some(self.upload(owner, id, upload).await?),
            None => None,
        };

        let now = Utc::now();
        let mut transaction = Transaction {
            id,
            kind: input.kind,
            bill_number: input.bill_number,
            party,
            material_type: input.material_type,
            weight: input.weight,
            weight_unit: input.weight_unit,
            rate_per_kg: input.rate_per_kg,
            taxable_amount: input.taxable_amount,
            gst_type: input.gst_type,
            gst_percent: input.gst_percent,
            cgst_amount: Decimal::ZERO,
            sgst_amount: Decimal::ZERO,
            igst_amount: Decimal::ZERO,
            total_gst_amount: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            bill_date: input.bill_date,
            due_date: input.due_date,
            financial_year,
            attachment,
            payments: Vec::new(),
            notes: input.notes,
            owner,
            created_at: now,
            updated_at: now,
        };
        transaction.apply_gst(breakdown);

        self.repo.insert(transaction).await
    }

    /// Fetch one bill.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the bill is absent or owned by someone else.
    pub async fn get(
        &self,
        owner: OwnerId,
        id: TransactionId,
    ) -> Result<Transaction, TransactionError> {
        self.repo
            .find_by_id(id, owner)
            .await?
            .ok_or(TransactionError::NotFound(id))
    }

    /// Update a bill from a partial input.
    ///
    /// The financial year follows a changed bill date; the GST figures are
    /// recomputed from the merged old and new values whenever any of the
    /// taxable amount, regime or rate changes. A replacement attachment is
    /// uploaded before the old object is released best-effort.
    ///
    /// # Errors
    ///
    /// Returns an error if the bill or a newly referenced party is
    /// missing, a provided field is invalid, or the upload of a new
    /// attachment fails.
    pub async fn update(
        &self,
        owner: OwnerId,
        id: TransactionId,
        input: UpdateTransaction,
    ) -> Result<Transaction, TransactionError> {
        let mut transaction = self.get(owner, id).await?;

        if let Some(bill_number) = input.bill_number {
            if bill_number.trim().is_empty() {
                return Err(TransactionError::MissingField("billNumber"));
            }
            transaction.bill_number = bill_number;
        }
        if let Some(material_type) = input.material_type {
            if material_type.trim().is_empty() {
                return Err(TransactionError::MissingField("materialType"));
            }
            transaction.material_type = material_type;
        }
        if let Some(party_id) = input.party_id {
            transaction.party = self
                .repo
                .party_ref(party_id, owner)
                .await?
                .ok_or(TransactionError::PartyNotFound(party_id))?;
        }
        if let Some(weight) = input.weight {
            non_negative(weight, "weight")?;
            transaction.weight = weight;
        }
        if let Some(unit) = input.weight_unit {
            transaction.weight_unit = unit;
        }
        if let Some(rate) = input.rate_per_kg {
            non_negative(rate, "ratePerKg")?;
            transaction.rate_per_kg = rate;
        }
        if let Some(bill_date) = input.bill_date {
            transaction.bill_date = bill_date;
            transaction.financial_year = fiscal::financial_year(bill_date.date_naive());
        }
        if let Some(due_date) = input.due_date {
            transaction.due_date = Some(due_date);
        }
        if let Some(notes) = input.notes {
            transaction.notes = notes;
        }

        // A partial GST update merges with the stored values before the
        // figures are recomputed as a whole.
        if input.taxable_amount.is_some() || input.gst_type.is_some() || input.gst_percent.is_some()
        {
            if let Some(taxable) = input.taxable_amount {
                non_negative(taxable, "taxableAmount")?;
                transaction.taxable_amount = taxable;
            }
            if let Some(gst_type) = input.gst_type {
                transaction.gst_type = gst_type;
            }
            if let Some(percent) = input.gst_percent {
                transaction.gst_percent = percent;
            }
            let breakdown = gst::calculate(
                transaction.taxable_amount,
                transaction.gst_type,
                transaction.gst_percent,
            );
            transaction.apply_gst(breakdown);
        }

        if let Some(upload) = input.attachment {
            let replacement = self.upload(owner, id, upload).await?;
            if let Some(old) = transaction.attachment.take() {
                self.release(&old).await;
            }
            transaction.attachment = Some(replacement);
        }

        transaction.updated_at = Utc::now();
        self.repo.save(transaction).await
    }

    /// Delete a bill permanently, releasing its attachment best-effort.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the bill is absent or owned by someone else.
    pub async fn delete(&self, owner: OwnerId, id: TransactionId) -> Result<(), TransactionError> {
        let transaction = self.get(owner, id).await?;

        if let Some(attachment) = &transaction.attachment {
            self.release(attachment).await;
        }

        self.repo.delete(id, owner).await?;
        Ok(())
    }

    /// List bills with pagination.
    ///
    /// The effective-status filter is applied after the page is fetched;
    /// `total` and `total_pages` keep reflecting the pre-status-filter
    /// match count.
    ///
    /// # Errors
    ///
    /// Returns an error when the repository fails.
    pub async fn list(
        &self,
        owner: OwnerId,
        filter: &TransactionFilter,
        status: Option<EffectiveStatus>,
        page: PageRequest,
    ) -> Result<PageResponse<Transaction>, TransactionError> {
        let items = self
            .repo
            .list(owner, filter, page.offset(), u64::from(page.limit))
            .await?;
        let total = self.repo.count(owner, filter).await?;

        let now = Utc::now();
        let data = match status {
            Some(wanted) => items
                .into_iter()
                .filter(|t| t.effective_status(now) == wanted)
                .collect(),
            None => items,
        };

        Ok(PageResponse::new(data, page.page, page.limit, total))
    }

    /// Record a payment against a bill.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a non-positive amount, `NotFound`
    /// when the bill is missing.
    pub async fn add_payment(
        &self,
        owner: OwnerId,
        id: TransactionId,
        input: NewPayment,
    ) -> Result<Transaction, TransactionError> {
        if input.amount <= Decimal::ZERO {
            return Err(TransactionError::InvalidPaymentAmount);
        }

        let mut transaction = self.get(owner, id).await?;
        let now = Utc::now();
        transaction.payments.push(Payment {
            id: PaymentId::new(),
            amount: input.amount,
            payment_date: input.payment_date.unwrap_or(now),
            mode: input.mode,
            note: input.note,
            reference: input.reference,
            created_at: now,
        });
        transaction.updated_at = now;

        self.repo.save(transaction).await
    }

    /// Remove one payment by id. Removing an id that is not present is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the bill is missing.
    pub async fn delete_payment(
        &self,
        owner: OwnerId,
        id: TransactionId,
        payment_id: PaymentId,
    ) -> Result<Transaction, TransactionError> {
        let mut transaction = self.get(owner, id).await?;
        transaction.payments.retain(|p| p.id != payment_id);
        transaction.updated_at = Utc::now();

        self.repo.save(transaction).await
    }

    async fn upload(
        &self,
        owner: OwnerId,
        id: TransactionId,
        upload: AttachmentUpload,
    ) -> Result<AttachmentRef, TransactionError> {
        let key = ObjectStore::object_key(owner, id, &upload.filename);
        let stored = self
            .store
            .put(&key, &upload.content_type, upload.data)
            .await?;
        Ok(AttachmentRef {
            url: stored.url,
            storage_id: stored.storage_id,
        })
    }

    /// Best-effort release of a stored attachment; failure is logged and
    /// swallowed so the record mutation still goes through.
    async fn release(&self, attachment: &AttachmentRef) {
        if let Err(e) = self.store.delete(&attachment.storage_id).await {
            tracing::warn!(
                storage_id = %attachment.storage_id,
                error = %e,
                "failed to release bill attachment"
            );
        }
    }
}
