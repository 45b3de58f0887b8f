//! Party types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use scraptally_shared::types::{OwnerId, PartyId};

use crate::transaction::Transaction;

/// Which side of the trade a party sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyRole {
    /// Material comes in from this party.
    Supplier,
    /// Material goes out to this party.
    Customer,
    /// Trades in both directions.
    #[default]
    Both,
}

impl PartyRole {
    /// Whether this party satisfies a role filter. A party trading in both
    /// directions matches either filter.
    #[must_use]
    pub fn matches(&self, wanted: PartyRole) -> bool {
        *self == wanted || *self == PartyRole::Both
    }
}

/// A supplier or customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    /// Unique identifier.
    pub id: PartyId,
    /// Party name.
    pub name: String,
    /// Mobile number.
    pub mobile: String,
    /// Postal address.
    pub address: String,
    /// GST registration number, stored uppercase.
    pub gst_number: String,
    /// Trading role.
    pub role: PartyRole,
    /// Owning user.
    pub owner: OwnerId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a party.
#[derive(Debug, Clone)]
pub struct CreateParty {
    /// Party name. Required.
    pub name: String,
    /// Mobile number.
    pub mobile: String,
    /// Postal address.
    pub address: String,
    /// GST registration number.
    pub gst_number: String,
    /// Trading role.
    pub role: PartyRole,
}

/// Partial update of a party. Absent fields keep their stored values.
#[derive(Debug, Clone, Default)]
pub struct UpdateParty {
    /// New name.
    pub name: Option<String>,
    /// New mobile number.
    pub mobile: Option<String>,
    /// New address.
    pub address: Option<String>,
    /// New GST registration number.
    pub gst_number: Option<String>,
    /// New trading role.
    pub role: Option<PartyRole>,
}

/// Filter for party queries.
#[derive(Debug, Clone, Default)]
pub struct PartyFilter {
    /// Role to match; parties trading in both directions always match.
    pub role: Option<PartyRole>,
    /// Case-insensitive substring of the name.
    pub name: Option<String>,
}

/// Totals over one party's bills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyLedgerSummary {
    /// Sum of purchase bill totals.
    pub total_purchase: Decimal,
    /// Sum of sale bill totals.
    pub total_sale: Decimal,
    /// Outstanding amount owed to the party.
    pub pending_payable: Decimal,
    /// Outstanding amount owed by the party.
    pub pending_receivable: Decimal,
}

/// One party's bills and outstanding balances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyLedger {
    /// The party.
    pub party: Party,
    /// Purchase bills from this party, bill date descending.
    pub purchases: Vec<Transaction>,
    /// Sale bills to this party, bill date descending.
    pub sales: Vec<Transaction>,
    /// Totals and outstanding balances.
    pub summary: PartyLedgerSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_matches_any_role_filter() {
        assert!(PartyRole::Both.matches(PartyRole::Supplier));
        assert!(PartyRole::Both.matches(PartyRole::Customer));
        assert!(PartyRole::Supplier.matches(PartyRole::Supplier));
        assert!(!PartyRole::Supplier.matches(PartyRole::Customer));
    }
}
