//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `PartyId` where a
//! `TransactionId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(OwnerId, "Unique identifier for the owning user of a record.");
typed_id!(PartyId, "Unique identifier for a trading party.");
typed_id!(
    TransactionId,
    "Unique identifier for a purchase or sale bill."
);
typed_id!(PaymentId, "Unique identifier for a payment entry on a bill.");
typed_id!(LotId, "Unique identifier for a material lot.");
typed_id!(
    LotEntryId,
    "Unique identifier for a purchase or sale allocation within a lot."
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(TransactionId::new(), TransactionId::new());
        assert_ne!(LotId::new(), LotId::new());
    }

    #[test]
    fn test_display_and_parse_roundtrip() {
        let id = PartyId::new();
        let parsed = PartyId::from_str(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_from_uuid_preserves_value() {
        let uuid = Uuid::now_v7();
        let id = OwnerId::from_uuid(uuid);
        assert_eq!(id.into_inner(), uuid);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(PaymentId::from_str("not-a-uuid").is_err());
    }
}
