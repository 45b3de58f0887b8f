//! Party service implementation.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use scraptally_shared::types::{OwnerId, PartyId};

use super::error::PartyError;
use super::types::{
    CreateParty, Party, PartyFilter, PartyLedger, PartyLedgerSummary, UpdateParty,
};
use crate::transaction::{Transaction, TransactionKind};

/// Repository trait for party persistence.
///
/// Implemented by the db layer. `list` returns parties ordered by name.
pub trait PartyRepository: Send + Sync {
    /// Persist a new party.
    fn insert(
        &self,
        party: Party,
    ) -> impl std::future::Future<Output = Result<Party, PartyError>> + Send;

    /// Find a party by id, scoped to its owner.
    fn find_by_id(
        &self,
        id: PartyId,
        owner: OwnerId,
    ) -> impl std::future::Future<Output = Result<Option<Party>, PartyError>> + Send;

    /// Persist changes to an existing party.
    fn save(
        &self,
        party: Party,
    ) -> impl std::future::Future<Output = Result<Party, PartyError>> + Send;

    /// Delete a party by id. Returns whether a record was removed.
    fn delete(
        &self,
        id: PartyId,
        owner: OwnerId,
    ) -> impl std::future::Future<Output = Result<bool, PartyError>> + Send;

    /// List parties matching a filter, ordered by name.
    fn list(
        &self,
        owner: OwnerId,
        filter: &PartyFilter,
    ) -> impl std::future::Future<Output = Result<Vec<Party>, PartyError>> + Send;

    /// Count bills (purchases and sales) referencing a party.
    fn transaction_count(
        &self,
        id: PartyId,
        owner: OwnerId,
    ) -> impl std::future::Future<Output = Result<u64, PartyError>> + Send;

    /// Fetch a party's bills, optionally narrowed to one financial year,
    /// ordered by bill date descending.
    fn transactions_for_party(
        &self,
        id: PartyId,
        owner: OwnerId,
        financial_year: Option<&str>,
    ) -> impl std::future::Future<Output = Result<Vec<Transaction>, PartyError>> + Send;
}

/// Party service for the supplier/customer registry.
pub struct PartyService<R: PartyRepository> {
    repo: Arc<R>,
}

impl<R: PartyRepository> PartyService<R> {
    /// Create a new party service.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Create a party. GST numbers are stored uppercase.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the name is blank.
    pub async fn create(&self, owner: OwnerId, input: CreateParty) -> Result<Party, PartyError> {
        if input.name.trim().is_empty() {
            return Err(PartyError::MissingField("name"));
        }

        let now = Utc::now();
        let party = Party {
            id: PartyId::new(),
            name: input.name,
            mobile: input.mobile,
            address: input.address,
            gst_number: input.gst_number.to_uppercase(),
            role: input.role,
            owner,
            created_at: now,
            updated_at: now,
        };

        self.repo.insert(party).await
    }

    /// Fetch one party.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the party is absent or owned by someone
    /// else.
    pub async fn get(&self, owner: OwnerId, id: PartyId) -> Result<Party, PartyError> {
        self.repo
            .find_by_id(id, owner)
            .await?
            .ok_or(PartyError::NotFound(id))
    }

    /// Update a party from a partial input.
    ///
    /// # Errors
    ///
    /// Returns an error when the party is missing or a provided name is
    /// blank.
    pub async fn update(
        &self,
        owner: OwnerId,
        id: PartyId,
        input: UpdateParty,
    ) -> Result<Party, PartyError> {
        let mut party = self.get(owner, id).await?;

        if let Some(name) = input.name {
            if name.trim().is_empty() {
                return Err(PartyError::MissingField("name"));
            }
            party.name = name;
        }
        if let Some(mobile) = input.mobile {
            party.mobile = mobile;
        }
        if let Some(address) = input.address {
            party.address = address;
        }
        if let Some(gst_number) = input.gst_number {
            party.gst_number = gst_number.to_uppercase();
        }
        if let Some(role) = input.role {
            party.role = role;
        }

        party.updated_at = Utc::now();
        self.repo.save(party).await
    }

    /// Delete a party. Blocked while any bill references it.
    ///
    /// # Errors
    ///
    /// Returns `HasTransactions` when bills reference the party,
    /// `NotFound` when it is missing.
    pub async fn delete(&self, owner: OwnerId, id: PartyId) -> Result<(), PartyError> {
        self.get(owner, id).await?;

        if self.repo.transaction_count(id, owner).await? > 0 {
            return Err(PartyError::HasTransactions);
        }

        self.repo.delete(id, owner).await?;
        Ok(())
    }

    /// List parties.
    ///
    /// # Errors
    ///
    /// Returns an error when the repository fails.
    pub async fn list(
        &self,
        owner: OwnerId,
        filter: &PartyFilter,
    ) -> Result<Vec<Party>, PartyError> {
        self.repo.list(owner, filter).await
    }

    /// Build one party's ledger: its bills and outstanding balances,
    /// optionally narrowed to one financial year.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the party is missing.
    pub async fn ledger(
        &self,
        owner: OwnerId,
        id: PartyId,
        financial_year: Option<&str>,
    ) -> Result<PartyLedger, PartyError> {
        let party = self.get(owner, id).await?;
        let transactions = self
            .repo
            .transactions_for_party(id, owner, financial_year)
            .await?;

        let (purchases, sales): (Vec<Transaction>, Vec<Transaction>) = transactions
            .into_iter()
            .partition(|t| t.kind == TransactionKind::Purchase);

        let total_purchase: Decimal = purchases.iter().map(|t| t.total_amount).sum();
        let total_sale: Decimal = sales.iter().map(|t| t.total_amount).sum();
        let purchase_paid: Decimal = purchases.iter().map(Transaction::paid_amount).sum();
        let sale_paid: Decimal = sales.iter().map(Transaction::paid_amount).sum();

        Ok(PartyLedger {
            party,
            purchases,
            sales,
            summary: PartyLedgerSummary {
                total_purchase,
                total_sale,
                pending_payable: total_purchase - purchase_paid,
                pending_receivable: total_sale - sale_paid,
            },
        })
    }
}
