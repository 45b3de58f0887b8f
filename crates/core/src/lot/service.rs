//! Lot service implementation.

use std::sync::Arc;

use chrono::Utc;

use scraptally_shared::types::{LotEntryId, LotId, OwnerId, TransactionId};

use super::error::LotError;
use super::types::{CreateLot, Lot, LotEntry, LotFilter, LotStatus, NewLotEntry, UpdateLot};
use crate::fiscal;

/// Repository trait for lot persistence.
///
/// Implemented by the db layer. `list` returns lots ordered by creation
/// descending.
pub trait LotRepository: Send + Sync {
    /// Persist a new lot.
    fn insert(
        &self,
        lot: Lot,
    ) -> impl std::future::Future<Output = Result<Lot, LotError>> + Send;

    /// Find a lot by id, scoped to its owner.
    fn find_by_id(
        &self,
        id: LotId,
        owner: OwnerId,
    ) -> impl std::future::Future<Output = Result<Option<Lot>, LotError>> + Send;

    /// Persist changes to an existing lot.
    fn save(&self, lot: Lot) -> impl std::future::Future<Output = Result<Lot, LotError>> + Send;

    /// Delete a lot by id. Returns whether a record was removed.
    fn delete(
        &self,
        id: LotId,
        owner: OwnerId,
    ) -> impl std::future::Future<Output = Result<bool, LotError>> + Send;

    /// List lots matching a filter, ordered by creation descending.
    fn list(
        &self,
        owner: OwnerId,
        filter: &LotFilter,
    ) -> impl std::future::Future<Output = Result<Vec<Lot>, LotError>> + Send;

    /// Look up the stored financial year of a purchase bill.
    fn purchase_financial_year(
        &self,
        transaction_id: TransactionId,
        owner: OwnerId,
    ) -> impl std::future::Future<Output = Result<Option<String>, LotError>> + Send;
}

/// Lot service for reconciliation bookkeeping.
pub struct LotService<R: LotRepository> {
    repo: Arc<R>,
}

fn validate_entry(entry: &NewLotEntry) -> Result<(), LotError> {
    if entry.weight.is_zero() {
        return Err(LotError::InvalidEntryValue("weight"));
    }
    if entry.rate.is_zero() {
        return Err(LotError::InvalidEntryValue("rate"));
    }
    if entry.amount.is_zero() {
        return Err(LotError::InvalidEntryValue("amount"));
    }
    Ok(())
}

/// Validates a whole entry list and assigns allocation ids. At most one
/// entry per bill per side.
fn build_entries(inputs: Vec<NewLotEntry>) -> Result<Vec<LotEntry>, LotError> {
    let mut entries: Vec<LotEntry> = Vec::with_capacity(inputs.len());
    for input in inputs {
        validate_entry(&input)?;
        if entries
            .iter()
            .any(|e| e.transaction_id == input.transaction_id)
        {
            return Err(LotError::DuplicateEntry(input.transaction_id));
        }
        entries.push(LotEntry {
            id: LotEntryId::new(),
            transaction_id: input.transaction_id,
            weight: input.weight,
            rate: input.rate,
            amount: input.amount,
        });
    }
    Ok(entries)
}

fn push_entry(entries: &mut Vec<LotEntry>, input: NewLotEntry) -> Result<(), LotError> {
    validate_entry(&input)?;
    if entries
        .iter()
        .any(|e| e.transaction_id == input.transaction_id)
    {
        return Err(LotError::DuplicateEntry(input.transaction_id));
    }
    entries.push(LotEntry {
        id: LotEntryId::new(),
        transaction_id: input.transaction_id,
        weight: input.weight,
        rate: input.rate,
        amount: input.amount,
    });
    Ok(())
}

impl<R: LotRepository> LotService<R> {
    /// Create a new lot service.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Create a lot.
    ///
    /// The financial year is taken from the first linked purchase's stored
    /// year when initial purchase allocations are supplied (falling back to
    /// the current fiscal year when the lookup misses), otherwise the
    /// current fiscal year.
    ///
    /// # Errors
    ///
    /// Returns an error if the lot number or material type is blank, or an
    /// initial allocation is invalid or duplicated.
    pub async fn create(&self, owner: OwnerId, input: CreateLot) -> Result<Lot, LotError> {
        if input.lot_number.trim().is_empty() {
            return Err(LotError::MissingField("lotNumber"));
        }
        if input.material_type.trim().is_empty() {
            return Err(LotError::MissingField("materialType"));
        }

        let financial_year = match input.purchases.first() {
            Some(first) => self
                .repo
                .purchase_financial_year(first.transaction_id, owner)
                .await?
                .unwrap_or_else(|| fiscal::financial_year(Utc::now().date_naive())),
            None => fiscal::financial_year(Utc::now().date_naive()),
        };

        let purchases = build_entries(input.purchases)?;
        let sales = build_entries(input.sales)?;

        let now = Utc::now();
        let lot = Lot {
            id: LotId::new(),
            lot_number: input.lot_number,
            material_type: input.material_type,
            financial_year,
            description: input.description,
            purchases,
            sales,
            owner,
            created_at: now,
            updated_at: now,
        };

        self.repo.insert(lot).await
    }

    /// Fetch one lot.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the lot is absent or owned by someone else.
    pub async fn get(&self, owner: OwnerId, id: LotId) -> Result<Lot, LotError> {
        self.repo
            .find_by_id(id, owner)
            .await?
            .ok_or(LotError::NotFound(id))
    }

    /// Update a lot from a partial input. A provided allocation list
    /// replaces the stored one wholesale.
    ///
    /// # Errors
    ///
    /// Returns an error if the lot is missing or a provided field or
    /// allocation list is invalid.
    pub async fn update(
        &self,
        owner: OwnerId,
        id: LotId,
        input: UpdateLot,
    ) -> Result<Lot, LotError> {
        let mut lot = self.get(owner, id).await?;

        if let Some(lot_number) = input.lot_number {
            if lot_number.trim().is_empty() {
                return Err(LotError::MissingField("lotNumber"));
            }
            lot.lot_number = lot_number;
        }
        if let Some(material_type) = input.material_type {
            if material_type.trim().is_empty() {
                return Err(LotError::MissingField("materialType"));
            }
            lot.material_type = material_type;
        }
        if let Some(description) = input.description {
            lot.description = description;
        }
        if let Some(purchases) = input.purchases {
            lot.purchases = build_entries(purchases)?;
        }
        if let Some(sales) = input.sales {
            lot.sales = build_entries(sales)?;
        }

        lot.updated_at = Utc::now();
        self.repo.save(lot).await
    }

    /// Allocate a purchase bill to a lot.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateEntry` when the bill is already allocated on the
    /// purchase side, a validation error for zero values.
    pub async fn add_purchase_entry(
        &self,
        owner: OwnerId,
        id: LotId,
        input: NewLotEntry,
    ) -> Result<Lot, LotError> {
        let mut lot = self.get(owner, id).await?;
        push_entry(&mut lot.purchases, input)?;
        lot.updated_at = Utc::now();
        self.repo.save(lot).await
    }

    /// Allocate a sale bill to a lot.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateEntry` when the bill is already allocated on the
    /// sale side, a validation error for zero values.
    pub async fn add_sale_entry(
        &self,
        owner: OwnerId,
        id: LotId,
        input: NewLotEntry,
    ) -> Result<Lot, LotError> {
        let mut lot = self.get(owner, id).await?;
        push_entry(&mut lot.sales, input)?;
        lot.updated_at = Utc::now();
        self.repo.save(lot).await
    }

    /// Remove a purchase allocation by entry id. The referenced bill is
    /// untouched; removing an unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the lot is missing.
    pub async fn remove_purchase_entry(
        &self,
        owner: OwnerId,
        id: LotId,
        entry_id: LotEntryId,
    ) -> Result<Lot, LotError> {
        let mut lot = self.get(owner, id).await?;
        lot.purchases.retain(|e| e.id != entry_id);
        lot.updated_at = Utc::now();
        self.repo.save(lot).await
    }

    /// Remove a sale allocation by entry id. The referenced bill is
    /// untouched; removing an unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the lot is missing.
    pub async fn remove_sale_entry(
        &self,
        owner: OwnerId,
        id: LotId,
        entry_id: LotEntryId,
    ) -> Result<Lot, LotError> {
        let mut lot = self.get(owner, id).await?;
        lot.sales.retain(|e| e.id != entry_id);
        lot.updated_at = Utc::now();
        self.repo.save(lot).await
    }

    /// Delete a lot. Only the grouping is removed, never the bills it
    /// referenced.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the lot is missing.
    pub async fn delete(&self, owner: OwnerId, id: LotId) -> Result<(), LotError> {
        self.get(owner, id).await?;
        self.repo.delete(id, owner).await?;
        Ok(())
    }

    /// List lots, optionally narrowed to one derived status after the
    /// fetch.
    ///
    /// # Errors
    ///
    /// Returns an error when the repository fails.
    pub async fn list(
        &self,
        owner: OwnerId,
        filter: &LotFilter,
        status: Option<LotStatus>,
    ) -> Result<Vec<Lot>, LotError> {
        let lots = self.repo.list(owner, filter).await?;
        Ok(match status {
            Some(wanted) => lots
                .into_iter()
                .filter(|l| l.metrics().status == wanted)
                .collect(),
            None => lots,
        })
    }
}
